use tauri::State;

use crate::{
    diary::MOOD_EMOJIS,
    models::{DiaryEntry, DiaryEntryInput, MoodPoint},
    AppState,
};

#[tauri::command]
pub fn get_diary_entries(state: State<'_, AppState>) -> Vec<DiaryEntry> {
    state.diary.entries()
}

#[tauri::command]
pub fn get_mood_trend(state: State<'_, AppState>) -> Vec<MoodPoint> {
    state.diary.mood_trend()
}

#[tauri::command]
pub fn get_mood_emojis() -> Vec<&'static str> {
    MOOD_EMOJIS.to_vec()
}

#[tauri::command]
pub fn save_diary_entry(
    state: State<'_, AppState>,
    input: DiaryEntryInput,
) -> Result<DiaryEntry, String> {
    state.diary.save_entry(input).map_err(|e| e.to_string())
}
