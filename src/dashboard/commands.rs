use tauri::State;

use crate::{dashboard::DashboardSnapshot, models::AnalysisRecord, AppState};

#[tauri::command]
pub fn get_dashboard(state: State<'_, AppState>) -> DashboardSnapshot {
    super::snapshot(&state.store, &state.config.dashboard)
}

#[tauri::command]
pub fn list_analyses(state: State<'_, AppState>) -> Vec<AnalysisRecord> {
    state.store.snapshot()
}

#[tauri::command]
pub fn clear_analyses(state: State<'_, AppState>) {
    state.store.clear();
}
