use axum::{Json, extract::State, response::IntoResponse};
use chrono::Local;

use crate::{
    api::{app_state::AppState, dto::form_dto::FormOptionsResponse},
    models::student::Course,
};

pub async fn form_options(State(state): State<AppState>) -> impl IntoResponse {
    let gate = &state.form_gate;
    Json(FormOptionsResponse {
        courses: Course::ALL.iter().map(|c| c.label().to_string()).collect(),
        min_age: 0,
        max_age: gate.maximum_age(),
        required_age: gate.minimum_age(),
        earliest_birthdate: gate.earliest_birthdate(),
        latest_birthdate: Local::now().date_naive(),
    })
}
