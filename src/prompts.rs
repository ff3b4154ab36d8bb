pub const CAPTION_SYSTEM: &str = include_str!("../data/prompts/caption_system.txt");

/// Sampling temperature sent with every caption request.
pub const CAPTION_TEMPERATURE: f32 = 0.9;

/// Upper bound on the number of captions handed back to callers.
pub const MAX_CAPTIONS: usize = 5;

/// Served when the model reply cannot be turned into captions.
pub const FALLBACK_CAPTIONS: [&str; MAX_CAPTIONS] = [
    "Living my best life, one adventure at a time ✈️",
    "Wanderlust and city dust 🌍",
    "Collecting moments, not things 📸",
    "Take only memories, leave only footprints 👣",
    "Adventure awaits, go find it! 🗺️",
];
