//! Centralized constants for the chatbot
//!
//! Single source of truth for placeholder contact values, the built-in
//! default client record and the canned fallback wording. Both the
//! configuration store and the responder read from here.

/// Contact values substituted when a client record does not provide them
pub mod placeholders {
    /// Placeholder phone number
    pub const PHONE: &str = "(555) 123-4567";

    /// Placeholder email address
    pub const EMAIL: &str = "info@business.com";

    /// Placeholder website
    pub const WEBSITE: &str = "www.business.com";

    /// Template tokens replaced by the resolved contact values
    pub const PHONE_TOKEN: &str = "{phone}";
    pub const EMAIL_TOKEN: &str = "{email}";
    pub const WEBSITE_TOKEN: &str = "{website}";
}

/// Built-in record returned for clients without a stored configuration
pub mod default_client {
    /// Business name of the default record
    pub const BUSINESS_NAME: &str = "Business";

    /// Pattern key of the single default response
    pub const RESPONSE_PATTERN: &str = "default";

    /// Generic contact message of the default response
    pub const RESPONSE: &str =
        "Thank you for contacting us. Please call (555) 123-4567 for assistance.";

    /// Fallback of the default record
    pub const FALLBACK: &str = "Please call us at (555) 123-4567 for assistance.";

    /// Client id used when a chat request does not name one
    pub const CLIENT_ID: &str = "default";
}

/// Fallback wording
pub mod fallback {
    /// Industry assumed when a record does not declare one
    pub const DEFAULT_INDUSTRY: &str = "general";

    /// Generic message used when no template applies
    pub const GENERIC: &str = "I'm sorry, I don't have information about that specific question. Please contact us for help.";
}

/// Patterns synthesized from legacy flat-field records
pub mod legacy {
    /// Pattern answered by the `services` text
    pub const SERVICES_PATTERN: &str = "services|training|classes|workout";

    /// Pattern answered by the `hours` text
    pub const HOURS_PATTERN: &str = "hours|open|time|schedule";

    /// Pattern answered by the formatted `contact` value
    pub const CONTACT_PATTERN: &str = "contact|phone|call";
}

/// Confidence labels attached to replies
pub mod confidence {
    /// Reply text does not mention a fallback
    pub const HIGH: f64 = 0.9;

    /// Reply text mentions a fallback
    pub const LOW: f64 = 0.3;

    /// Marker searched for (case-insensitively) in the reply text
    pub const FALLBACK_MARKER: &str = "fallback";
}

/// Server defaults
pub mod server {
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 8001;
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
    pub const DEFAULT_CLIENT_CONFIG_DIR: &str = "configs/clients";
    pub const SERVICE_NAME: &str = "tier1-chatbot";
}
