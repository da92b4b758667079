use tauri::State;

use crate::{
    models::VoiceAnalysis,
    voice::{UploadedFile, VoiceAnalysisController, VoicePanelSnapshot, ACCEPT_FILTER},
    AppState,
};

fn controller_from_state(state: &State<'_, AppState>) -> VoiceAnalysisController {
    state.voice.clone()
}

#[tauri::command]
pub async fn get_voice_panel(state: State<'_, AppState>) -> Result<VoicePanelSnapshot, String> {
    let controller = controller_from_state(&state);
    Ok(controller.snapshot().await)
}

#[tauri::command]
pub async fn toggle_recording(state: State<'_, AppState>) -> Result<VoicePanelSnapshot, String> {
    let controller = controller_from_state(&state);
    controller
        .toggle_recording()
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn get_audio_accept_filter() -> &'static str {
    ACCEPT_FILTER
}

/// Errors carry the alert text the frontend shows for rejected files.
#[tauri::command]
pub async fn select_audio_file(
    state: State<'_, AppState>,
    file: UploadedFile,
) -> Result<VoicePanelSnapshot, String> {
    let controller = controller_from_state(&state);
    controller.select_file(file).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn analyze_audio_file(state: State<'_, AppState>) -> Result<VoiceAnalysis, String> {
    let controller = controller_from_state(&state);
    controller
        .analyze_selected()
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn reset_voice_panel(state: State<'_, AppState>) -> Result<VoicePanelSnapshot, String> {
    let controller = controller_from_state(&state);
    Ok(controller.reset().await)
}
