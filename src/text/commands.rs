use tauri::State;

use crate::{
    models::TextAnalysis,
    text::{TextAnalysisController, TextPanelSnapshot, SAMPLE_TEXTS},
    AppState,
};

fn controller_from_state(state: &State<'_, AppState>) -> TextAnalysisController {
    state.text.clone()
}

#[tauri::command]
pub async fn get_text_panel(state: State<'_, AppState>) -> Result<TextPanelSnapshot, String> {
    let controller = controller_from_state(&state);
    Ok(controller.snapshot().await)
}

#[tauri::command]
pub async fn set_text_input(
    state: State<'_, AppState>,
    text: String,
) -> Result<TextPanelSnapshot, String> {
    let controller = controller_from_state(&state);
    Ok(controller.set_text(text).await)
}

#[tauri::command]
pub fn get_sample_texts() -> Vec<&'static str> {
    SAMPLE_TEXTS.to_vec()
}

#[tauri::command]
pub async fn use_sample_text(
    state: State<'_, AppState>,
    index: usize,
) -> Result<TextPanelSnapshot, String> {
    let controller = controller_from_state(&state);
    controller.use_sample(index).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn submit_text_analysis(state: State<'_, AppState>) -> Result<TextAnalysis, String> {
    let controller = controller_from_state(&state);
    controller.submit().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn reset_text_panel(state: State<'_, AppState>) -> Result<TextPanelSnapshot, String> {
    let controller = controller_from_state(&state);
    Ok(controller.reset().await)
}
