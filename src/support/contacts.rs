use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    pub name: String,
    pub number: String,
    pub description: String,
    /// `tel:` or `sms:` link the OS opens.
    pub href: String,
}

impl EmergencyContact {
    fn new(name: &str, number: &str, description: &str) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
            description: description.into(),
            href: contact_href(number),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelfCareActivity {
    pub icon: String,
    pub title: String,
    pub description: String,
}

pub const CRISIS_TEXT_HREF: &str = "sms:741741?body=HOME";
pub const LIFELINE_HREF: &str = "tel:988";

/// Text-line numbers open an SMS draft; anything else dials the digits.
pub fn contact_href(number: &str) -> String {
    if number.contains("Text") {
        CRISIS_TEXT_HREF.to_string()
    } else {
        let digits: String = number.chars().filter(char::is_ascii_digit).collect();
        format!("tel:{digits}")
    }
}

/// Only `tel:` and `sms:` links leave the app.
pub fn is_contact_href(href: &str) -> bool {
    let lowered = href.to_ascii_lowercase();
    (lowered.starts_with("tel:") || lowered.starts_with("sms:")) && href.len() > 4
}

pub fn emergency_contacts() -> Vec<EmergencyContact> {
    vec![
        EmergencyContact::new(
            "National Suicide Prevention Lifeline",
            "988",
            "24/7 crisis support",
        ),
        EmergencyContact::new(
            "Crisis Text Line",
            "Text HOME to 741741",
            "Free 24/7 crisis counseling",
        ),
        EmergencyContact::new(
            "SAMHSA National Helpline",
            "1-800-662-4357",
            "Mental health and substance abuse",
        ),
    ]
}

pub fn self_care_activities() -> Vec<SelfCareActivity> {
    [
        ("🧘", "Breathing Exercise", "Try the 4-7-8 breathing technique"),
        ("🎵", "Calming Music", "Listen to soothing sounds"),
        ("🚶", "Take a Walk", "Step outside for fresh air"),
        ("🫖", "Warm Drink", "Make yourself tea or warm water"),
        ("💭", "Grounding Exercise", "5-4-3-2-1 sensory technique"),
        ("📱", "Call Someone", "Reach out to a trusted friend"),
    ]
    .into_iter()
    .map(|(icon, title, description)| SelfCareActivity {
        icon: icon.into(),
        title: title.into(),
        description: description.into(),
    })
    .collect()
}
