//! Review template buckets keyed by style name

/// Style used when none is configured or the configured one is unknown
pub const DEFAULT_STYLE: &str = "funny";

/// Style names with a dedicated template bucket
pub const KNOWN_STYLES: &[&str] = &["funny", "roast", "motivational", "technical", "hilarious"];

const FUNNY: &[&str] = &[
    "😄 This function is doing its best",
    "🤣 It's not perfect, but it's trying",
    "😊 Simple and gets the job done",
    "🎉 This function deserves a party!",
    "😎 Cool function, bro!",
];

const ROAST: &[&str] = &[
    "🔥 This function needs a reality check",
    "😂 At least it's not the worst code ever",
    "🤦‍♂️ I've seen better code in a tutorial",
    "😅 This function is... interesting",
    "🤷‍♂️ It works, but at what cost?",
];

const MOTIVATIONAL: &[&str] = &[
    "💪 Keep coding, you're doing great!",
    "⭐ Every function is a step forward",
    "🚀 You're on the right track!",
    "🌟 You've got this! Amazing job!",
    "🔥 You're on fire! Keep coding!",
];

const TECHNICAL: &[&str] = &[
    "🔧 Functional and readable",
    "📊 Basic but effective",
    "⚡ Standard implementation",
    "🛡️ Proper structure",
    "📝 Clean and readable code",
];

const HILARIOUS: &[&str] = &[
    "🤪 This function is a character!",
    "🎭 Drama in the codebase!",
    "🤡 Clowning around with code!",
    "🎪 Welcome to the circus of functions!",
    "🦄 Unicorn code - magical but questionable!",
];

/// Template bucket for a style; unknown styles fall back to the default bucket
pub fn templates(style: &str) -> &'static [&'static str] {
    match style.to_lowercase().as_str() {
        "funny" => FUNNY,
        "roast" => ROAST,
        "motivational" => MOTIVATIONAL,
        "technical" => TECHNICAL,
        "hilarious" => HILARIOUS,
        _ => FUNNY,
    }
}
