pub mod dashboard;
pub mod diary;
pub mod events;
pub mod models;
pub mod navigation;
pub mod scheduler;
pub mod scoring;
pub mod settings;
pub mod store;
pub mod support;
pub mod text;
pub mod utils;
pub mod voice;

use std::sync::Arc;

use diary::DiaryBook;
use events::EventSink;
use navigation::Navigator;
use scoring::{EmotionScorer, KeywordScorer};
use settings::AppConfig;
use store::AnalysisStore;
use support::BreathingExercise;
use text::TextAnalysisController;
use voice::VoiceAnalysisController;

/// Composition root. Every panel shares the one analysis store built here.
pub struct AppState {
    pub config: AppConfig,
    pub store: AnalysisStore,
    pub navigator: Navigator,
    pub text: TextAnalysisController,
    pub voice: VoiceAnalysisController,
    pub diary: DiaryBook,
    pub breathing: BreathingExercise,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        scorer: Arc<dyn EmotionScorer>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        let store = AnalysisStore::new(events.clone());

        Self {
            navigator: Navigator::new(events.clone()),
            text: TextAnalysisController::new(
                config.text.clone(),
                scorer.clone(),
                store.clone(),
                events.clone(),
            ),
            voice: VoiceAnalysisController::new(
                config.voice.clone(),
                scorer,
                store.clone(),
                events.clone(),
            ),
            diary: DiaryBook::new(),
            breathing: BreathingExercise::new(config.breathing.clone(), events),
            store,
            config,
        }
    }

    /// Builds the default keyword scorer from `config.scoring`.
    pub fn with_keyword_scorer(config: AppConfig, events: Arc<dyn EventSink>) -> Self {
        let scorer = Arc::new(KeywordScorer::new(config.scoring.clone()));
        Self::new(config, scorer, events)
    }
}

#[cfg(feature = "desktop")]
mod desktop {
    use std::sync::Arc;

    use tauri::{Manager, State};

    use crate::{
        dashboard, diary,
        navigation::{tabs, TabInfo},
        settings::{debug_requested, AppConfig},
        support, text,
        utils::init_logging,
        voice, AppState,
    };

    #[tauri::command]
    fn get_tabs() -> Vec<TabInfo> {
        tabs()
    }

    #[tauri::command]
    fn get_active_tab(state: State<AppState>) -> TabInfo {
        state.navigator.active().into()
    }

    #[tauri::command]
    fn select_tab(id: String, state: State<AppState>) -> TabInfo {
        state.navigator.select(&id).into()
    }

    pub fn run() {
        init_logging(debug_requested());
        let config = AppConfig::load();

        log::info!("MindSense starting up...");

        tauri::Builder::default()
            .plugin(tauri_plugin_opener::init())
            .setup(move |app| {
                let events = Arc::new(app.handle().clone());
                app.manage(AppState::with_keyword_scorer(config, events));
                Ok(())
            })
            .invoke_handler(tauri::generate_handler![
                get_tabs,
                get_active_tab,
                select_tab,
                dashboard::commands::get_dashboard,
                dashboard::commands::list_analyses,
                dashboard::commands::clear_analyses,
                text::commands::get_text_panel,
                text::commands::set_text_input,
                text::commands::get_sample_texts,
                text::commands::use_sample_text,
                text::commands::submit_text_analysis,
                text::commands::reset_text_panel,
                voice::commands::get_voice_panel,
                voice::commands::toggle_recording,
                voice::commands::get_audio_accept_filter,
                voice::commands::select_audio_file,
                voice::commands::analyze_audio_file,
                voice::commands::reset_voice_panel,
                diary::commands::get_diary_entries,
                diary::commands::get_mood_trend,
                diary::commands::get_mood_emojis,
                diary::commands::save_diary_entry,
                support::commands::get_emergency_contacts,
                support::commands::get_self_care_activities,
                support::commands::open_contact,
                support::commands::get_breathing_state,
                support::commands::start_breathing,
                support::commands::stop_breathing,
            ])
            .run(tauri::generate_context!())
            .expect("error while running tauri application");
    }
}

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    desktop::run();
}
