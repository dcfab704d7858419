//! Fallback resolution
//!
//! Template choice, highest priority first:
//! 1. `fallback_response` from the record, if non-empty
//! 2. `fallback` from the record, if non-empty
//! 3. Built-in template for the record's industry
//! 4. Generic message
//!
//! The chosen template then has `{phone}`, `{email}` and `{website}`
//! replaced, in that order, each as a plain replace-all.

use tier1_chatbot_config::constants::{fallback, placeholders};
use tier1_chatbot_config::ClientConfig;

/// Industries with a built-in fallback template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Industry {
    Dental,
    Healthcare,
    Restaurant,
    Fitness,
    Salon,
    General,
}

impl Industry {
    /// Exact match on an already lower-cased industry name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dental" => Some(Self::Dental),
            "healthcare" => Some(Self::Healthcare),
            "restaurant" => Some(Self::Restaurant),
            "fitness" => Some(Self::Fitness),
            "salon" => Some(Self::Salon),
            "general" => Some(Self::General),
            _ => None,
        }
    }

    pub fn template(&self) -> &'static str {
        match self {
            Self::Dental | Self::Healthcare => HEALTH_TEMPLATE,
            Self::Restaurant => RESTAURANT_TEMPLATE,
            Self::Fitness => FITNESS_TEMPLATE,
            Self::Salon => SALON_TEMPLATE,
            Self::General => fallback::GENERIC,
        }
    }
}

const HEALTH_TEMPLATE: &str = "I don't have that information, but our staff can help!\n\n\u{1f4de} Call us: {phone}\n\u{1f4cd} Visit: {website}\n\nFor medical questions, please speak with our professionals directly.\n\nI can help with appointments, hours, services, or insurance questions though!";

const RESTAURANT_TEMPLATE: &str = "I don't have details on that, but our team does!\n\n\u{1f4de} Call us: {phone}\n\u{1f4cd} Visit: {website}\n\nFor special requests or detailed questions, our staff is here to help!\n\nI can help with our menu, hours, delivery, or reservations though!";

const FITNESS_TEMPLATE: &str = "I don't have that info, but our trainers do!\n\n\u{1f4de} Contact us: {phone}\n\u{1f3cb}\u{fe0f} Stop by during our hours\n\u{1f4dd} Visit: {website}\n\nI can help with membership info, class schedules, or general questions though!";

const SALON_TEMPLATE: &str = "I don't have that answer, but our stylists do!\n\n\u{1f4de} Call us: {phone}\n\u{1f4dd} Visit: {website}\n\nFor special requests, please contact our team directly.\n\nI can help with services, pricing, or appointments though!";

/// Contact values used for placeholder substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContact {
    pub phone: String,
    pub email: String,
    pub website: String,
}

impl ResolvedContact {
    /// Contact values from the record, placeholders where absent
    ///
    /// A contact field that is not an object (legacy string contact)
    /// contributes nothing here.
    pub fn from_config(config: &ClientConfig) -> Self {
        let details = config.contact_details();
        let pick = |value: Option<&String>, default: &str| {
            value.cloned().unwrap_or_else(|| default.to_string())
        };

        Self {
            phone: pick(details.and_then(|d| d.phone.as_ref()), placeholders::PHONE),
            email: pick(details.and_then(|d| d.email.as_ref()), placeholders::EMAIL),
            website: pick(details.and_then(|d| d.website.as_ref()), placeholders::WEBSITE),
        }
    }

    /// Substitute phone, then email, then website tokens
    pub fn fill(&self, template: &str) -> String {
        template
            .replace(placeholders::PHONE_TOKEN, &self.phone)
            .replace(placeholders::EMAIL_TOKEN, &self.email)
            .replace(placeholders::WEBSITE_TOKEN, &self.website)
    }
}

/// Template chosen for a record, before substitution
pub fn fallback_template(config: &ClientConfig) -> &str {
    let configured = [&config.fallback_response, &config.fallback]
        .into_iter()
        .filter_map(|f| f.as_deref())
        .find(|f| !f.is_empty());

    if let Some(template) = configured {
        return template;
    }

    let industry = config
        .industry
        .as_deref()
        .unwrap_or(fallback::DEFAULT_INDUSTRY)
        .to_lowercase();

    Industry::from_name(&industry)
        .map(|i| i.template())
        .unwrap_or(fallback::GENERIC)
}

/// Fallback reply for a record with placeholders resolved
pub fn fallback_response(config: &ClientConfig) -> String {
    let text = ResolvedContact::from_config(config).fill(fallback_template(config));
    if text.is_empty() {
        // Only reachable if every contact value is itself empty and the
        // template consists solely of tokens.
        return fallback::GENERIC.to_string();
    }
    text
}
