//! Static page copy
//!
//! Rendered as given; nothing in the site logic depends on these values.

/// One card in "The Grand Events"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

pub const EVENTS: [Event; 6] = [
    Event { name: "EVENT", description: "48-hour coding marathon", icon: "⚔️" },
    Event { name: "EVENT", description: "Battle of the machines", icon: "🐉" },
    Event { name: "EVENT", description: "Competitive programming", icon: "🔥" },
    Event { name: "EVENT", description: "Industry expert sessions", icon: "👑" },
    Event { name: "EVENT", description: "Esports tournament", icon: "🏰" },
    Event { name: "EVENT", description: "Machine learning showdown", icon: "❄️" },
];

pub const SPONSORS: [&str; 6] = [
    "sponsors", "sponsors", "sponsors", "sponsors", "sponsors", "sponsors",
];

pub const FEST_NAME: &str = "PRAYAN'26";
pub const SPLASH_MOTTO: &str = "IGNIS ET GLACIES";
pub const SPLASH_TAGLINE: &str = "Fire & Ice Awaits";
pub const HERO_SUBTITLE: &str = "Techno Culture Fest";
pub const HERO_QUOTE: &str = "\"When Fire Meets Ice, Legends Are Born\"";

pub const REALM_TITLE: &str = "The Realm Awaits";
pub const REALM_BODY: &str = "In the grand tradition of the ancient houses, PRAYAN\u{2019}26 summons the brightest minds to compete, create, and conquer. From the fiery forges of innovation to the icy peaks of intellect \u{2014} choose your allegiance and claim your throne.";

pub const REGISTER_PITCH: &str = "Winter is coming. Secure your spot before the gates close.";
pub const REGISTER_BUTTON: &str = "Enter the Realm";

/// Input on the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub placeholder: &'static str,
    /// HTML input type
    pub kind: &'static str,
}

pub const REGISTRATION_FIELDS: [FormField; 3] = [
    FormField { placeholder: "Your Name", kind: "text" },
    FormField { placeholder: "Your Email", kind: "email" },
    FormField { placeholder: "College Name", kind: "text" },
];

pub const FOOTER_COPYRIGHT: &str = "© 2026 Techno Culture Fest. All rights reserved.";
pub const FOOTER_MOTTO: &str = "\"Fire cannot kill a dragon.\"";
