use tauri::State;
use tauri_plugin_opener::OpenerExt;

use crate::{
    support::{
        emergency_contacts, is_contact_href, self_care_activities, BreathingState,
        EmergencyContact, SelfCareActivity,
    },
    AppState,
};

#[tauri::command]
pub fn get_emergency_contacts() -> Vec<EmergencyContact> {
    emergency_contacts()
}

#[tauri::command]
pub fn get_self_care_activities() -> Vec<SelfCareActivity> {
    self_care_activities()
}

#[tauri::command]
pub fn open_contact(app_handle: tauri::AppHandle, href: String) -> Result<(), String> {
    if !is_contact_href(&href) {
        return Err(format!("refusing to open non-contact link {href}"));
    }

    app_handle
        .opener()
        .open_url(href, None::<&str>)
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_breathing_state(state: State<'_, AppState>) -> Result<BreathingState, String> {
    Ok(state.breathing.state().await)
}

#[tauri::command]
pub async fn start_breathing(state: State<'_, AppState>) -> Result<BreathingState, String> {
    Ok(state.breathing.start().await)
}

#[tauri::command]
pub async fn stop_breathing(state: State<'_, AppState>) -> Result<BreathingState, String> {
    state.breathing.stop().await.map_err(|e| e.to_string())
}
