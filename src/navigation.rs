use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::events::{self, EventSink, TAB_CHANGED};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum Tab {
    #[default]
    Dashboard,
    Voice,
    Text,
    Diary,
    Panic,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Dashboard, Tab::Voice, Tab::Text, Tab::Diary, Tab::Panic];

    pub fn id(&self) -> &'static str {
        match self {
            Tab::Dashboard => "dashboard",
            Tab::Voice => "voice",
            Tab::Text => "text",
            Tab::Diary => "diary",
            Tab::Panic => "panic",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Voice => "Voice Analysis",
            Tab::Text => "Text Analysis",
            Tab::Diary => "Emotion Diary",
            Tab::Panic => "Support",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Tab::Dashboard => "📊",
            Tab::Voice => "🎙",
            Tab::Text => "📝",
            Tab::Diary => "📖",
            Tab::Panic => "🆘",
        }
    }

    /// Unknown ids land on the dashboard.
    pub fn from_id(id: &str) -> Tab {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.id() == id)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TabInfo {
    pub id: String,
    pub label: String,
    pub icon: String,
}

impl From<Tab> for TabInfo {
    fn from(tab: Tab) -> Self {
        Self {
            id: tab.id().into(),
            label: tab.label().into(),
            icon: tab.icon().into(),
        }
    }
}

pub fn tabs() -> Vec<TabInfo> {
    Tab::ALL.into_iter().map(TabInfo::from).collect()
}

#[derive(Clone)]
pub struct Navigator {
    active: Arc<RwLock<Tab>>,
    events: Arc<dyn EventSink>,
}

impl Navigator {
    pub fn new(events: Arc<dyn EventSink>) -> Self {
        Self {
            active: Arc::new(RwLock::new(Tab::default())),
            events,
        }
    }

    pub fn active(&self) -> Tab {
        match self.active.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub fn select(&self, id: &str) -> Tab {
        let tab = Tab::from_id(id);
        {
            let mut guard = match self.active.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if *guard == tab {
                return tab;
            }
            *guard = tab;
        }
        events::emit(self.events.as_ref(), TAB_CHANGED, &TabInfo::from(tab));
        tab
    }
}
