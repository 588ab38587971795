//! Random test data generators using the fake crate
//!
//! Provides realistic random data including:
//! - To-do titles and descriptions within the field limits
//! - Expiry times around a reference date
//! - Property-based testing strategies for valid and invalid input

use chrono::{Days, NaiveDate, NaiveDateTime};
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::Fake;
use proptest::prelude::*;
use rand::Rng;
use todo_core::validation::{MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH};
use todo_core::{NewToDo, ToDoPayload};

fn truncate_chars(text: String, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Generate a realistic title, never longer than the limit
pub fn generate_title() -> String {
    let title: String = Sentence(2..6).fake();
    truncate_chars(title, MAX_TITLE_LENGTH)
}

/// Generate a realistic description, never longer than the limit
pub fn generate_description() -> String {
    let description: String = Paragraph(1..3).fake();
    truncate_chars(description, MAX_DESCRIPTION_LENGTH)
}

/// Generate an expiry within a week either side of `around`
pub fn generate_expiry(around: NaiveDate) -> NaiveDateTime {
    let mut rng = rand::thread_rng();
    let offset: i64 = rng.gen_range(-7..=7);
    let day = if offset >= 0 {
        around + Days::new(offset as u64)
    } else {
        around - Days::new(offset.unsigned_abs())
    };
    day.and_hms_opt(rng.gen_range(0..24), rng.gen_range(0..60), 0)
        .unwrap_or_else(|| day.and_time(chrono::NaiveTime::MIN))
}

/// Generate a random valid input
pub fn generate_new_todo(around: NaiveDate) -> NewToDo {
    let mut rng = rand::thread_rng();
    let mut todo = NewToDo::new(generate_title(), generate_expiry(around))
        .with_complete_percent(f64::from(rng.gen_range(0..=100u8)));
    if rng.gen_bool(0.5) {
        todo = todo.with_description(generate_description());
    }
    todo
}

/// Proptest strategy for titles that pass validation
pub fn valid_title_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 ]{0,99}"
}

/// Proptest strategy for titles the validator must reject as missing
pub fn blank_title_strategy() -> impl Strategy<Value = String> {
    "[ \t\n]{0,20}"
}

/// Proptest strategy for percentages outside 0-100
pub fn out_of_range_percent_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![-1.0e6..-0.001f64, 100.001..1.0e6f64]
}

/// Proptest strategy for dates over several years
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN))
}

/// Proptest strategy for expiry times with minute precision
pub fn expiry_strategy() -> impl Strategy<Value = NaiveDateTime> {
    (date_strategy(), 0u32..24, 0u32..60).prop_map(|(date, h, m)| {
        date.and_hms_opt(h, m, 0)
            .unwrap_or_else(|| date.and_time(chrono::NaiveTime::MIN))
    })
}

/// Proptest strategy for inputs that pass validation
pub fn new_todo_strategy() -> impl Strategy<Value = NewToDo> {
    (
        valid_title_strategy(),
        proptest::option::of("[A-Za-z0-9 .,!?]{0,200}"),
        expiry_strategy(),
        0.0..=100.0f64,
        any::<bool>(),
    )
        .prop_map(|(title, description, expiry, percent, is_done)| NewToDo {
            title,
            description,
            expiry,
            complete_percent: percent,
            is_done,
        })
}

/// Proptest strategy for payloads that pass validation
pub fn valid_payload_strategy() -> impl Strategy<Value = ToDoPayload> {
    new_todo_strategy().prop_map(|todo| ToDoPayload {
        title: Some(todo.title),
        description: todo.description,
        expiry: Some(todo_core::models::expiry_format::format_expiry(&todo.expiry)),
        complete_percent: Some(todo.complete_percent),
        is_done: Some(todo.is_done),
    })
}
