//! Integration tests for standout-mask.
//!
//! These tests drive whole typing sessions through a [`MaskedInput`] bound to
//! an in-memory host, the same way a widget binding would.

use standout_mask::{
    presets, CompiledFormat, DateTimeMask, EditHost, MaskError, MaskedInput, MemoryHost,
    TokenDescriptor, TokenTable, BACKSPACE,
};

fn masked(template: &str) -> MaskedInput<MemoryHost> {
    let format = CompiledFormat::compile_builtin(template).unwrap();
    MaskedInput::new(format, MemoryHost::new())
}

// ============================================================================
// Test: Time entry
// ============================================================================

#[test]
fn time_typed_digit_by_digit() {
    let mut input = masked("%H:%M");
    assert_eq!(input.placeholder(), "HH:MM");
    assert_eq!(input.type_keys("930"), vec!["09", "09:3", "09:30"]);
}

#[test]
fn time_full_seconds() {
    let mut input = masked(presets::TIME_FORMAT);
    let steps = input.type_keys("235959");
    assert_eq!(steps.last().unwrap(), "23:59:59");
}

#[test]
fn time_overflow_closes_each_field() {
    let mut input = masked(presets::TIME_FORMAT);
    assert_eq!(input.type_keys("377"), vec!["03", "03:07", "03:07:07"]);
}

#[test]
fn typing_past_the_end_is_ignored() {
    let mut input = masked("%H:%M");
    let steps = input.type_keys("12345");
    assert_eq!(steps, vec!["1", "12", "12:3", "12:34", "12:34"]);
}

#[test]
fn typed_separators_are_normalised() {
    let mut input = masked("%H:%M");
    let steps = input.type_keys("1.3");
    assert_eq!(steps, vec!["1", "1", "13"]);
}

// ============================================================================
// Test: Deleting
// ============================================================================

#[test]
fn deleting_through_a_delimiter() {
    let mut input = masked("%H:%M");
    input.type_keys("0930");

    let back = BACKSPACE.to_string().repeat(5);
    let steps = input.type_keys(&back);
    assert_eq!(steps, vec!["09:3", "09:", "09", "0", ""]);
}

#[test]
fn retyping_after_delete() {
    let mut input = masked("%H:%M");
    input.type_keys("0930");
    input.type_keys(&format!("{BACKSPACE}{BACKSPACE}"));
    assert_eq!(input.value(), "09:");

    assert_eq!(input.type_keys("45"), vec!["09:4", "09:45"]);
}

#[test]
fn deletion_does_not_retrigger_overflow_closure() {
    let mut input = masked("%H:%M");
    input.type_keys("3");
    assert_eq!(input.value(), "03");

    // "3" alone would close to "03" again if it were reformatted.
    input.host_mut().replace_text("3");
    input.on_edit();
    assert_eq!(input.value(), "3");
}

// ============================================================================
// Test: Dates
// ============================================================================

#[test]
fn date_default_format() {
    let mut input = masked(presets::DATE_FORMAT);
    let steps = input.type_keys("4122024");
    assert_eq!(steps.last().unwrap(), "04/12/2024");
}

#[test]
fn iso_date() {
    let mut input = masked("%Y-%m-%d");
    assert_eq!(input.placeholder(), "YYYY-MM-DD");
    let steps = input.type_keys("202439");
    assert_eq!(steps.last().unwrap(), "2024-03-09");
}

#[test]
fn day_of_year() {
    let mut input = masked("%Y.%j");
    let steps = input.type_keys("20244");
    assert_eq!(steps.last().unwrap(), "2024.04");
}

#[test]
fn paste_whole_value() {
    let mut input = masked(presets::DATE_FORMAT);
    input.host_mut().type_str("24-12-2024");
    input.on_edit();
    assert_eq!(input.value(), "24/12/2024");
}

#[test]
fn pasted_value_with_stray_letters_stays_in_bounds() {
    let mut input = masked("%H:%M");
    input.host_mut().type_str("2a9");
    input.on_edit();
    assert_eq!(input.value(), "02:09");

    // A second edit event with the same text writes nothing.
    assert!(!input.on_edit());
}

#[test]
fn stored_value_normalised_without_state() {
    let format = CompiledFormat::compile_builtin(presets::DATE_FORMAT).unwrap();
    assert_eq!(format.format_value("1/2/2024"), "12/02/024");
    assert_eq!(format.format_value("01/02/2024"), "01/02/2024");
    assert_eq!(format.last_len(), 0);
}

// ============================================================================
// Test: Named fields
// ============================================================================

#[test]
fn weekday_and_month_shorthands() {
    let mut input = masked("%a %b");
    assert_eq!(input.placeholder(), "Day Mon");

    input.type_keys("m");
    assert_eq!(input.value(), "mon");

    input.type_keys(" j");
    assert_eq!(input.value(), "mon jan");
}

#[test]
fn weekday_and_month_from_successive_edits() {
    let mut input = masked("%a %b");
    let mut values = Vec::new();
    for edit in ["m", "m j", "mon jan"] {
        input.host_mut().replace_text(edit);
        input.on_edit();
        values.push(input.value());
    }
    assert_eq!(values, vec!["mon", "mj", "mon jan"]);
}

#[test]
fn colliding_months_need_three_letters() {
    let mut input = masked("%b");
    assert_eq!(input.type_keys("may"), vec!["m", "ma", "may"]);
}

#[test]
fn invalid_weekday_clears() {
    let mut input = masked("%a");
    assert_eq!(input.type_keys("xyz"), vec!["x", "xy", ""]);
}

#[test]
fn full_date_with_names() {
    let mut input = masked("%a %d %b %Y");
    input.type_keys("th");
    assert_eq!(input.value(), "thu");
    input.type_keys("9");
    assert_eq!(input.value(), "thu 09");
    input.type_keys("o");
    assert_eq!(input.value(), "thu 09 oct");
    input.type_keys("2025");
    assert_eq!(input.value(), "thu 09 oct 2025");
}

// ============================================================================
// Test: Custom catalogs
// ============================================================================

#[test]
fn custom_catalog_from_yaml() {
    let custom = TokenTable::from_yaml(
        r#"
tokens:
  q: { kind: numeric, width: 1, placeholder: Q, max: 4 }
  s:
    kind: enumerated
    placeholder: sss
    values: [spr, sum, aut, win]
    shorthands: { sp: spr, su: sum, a: aut, w: win }
"#,
    )
    .unwrap();
    let table = TokenTable::default().merge(custom);

    let format = CompiledFormat::compile("%Y Q%q %s", &table).unwrap();
    assert_eq!(format.placeholder(), "YYYY QQ sss");

    let mut input = MaskedInput::new(format, MemoryHost::new());
    input.type_keys("20243w");
    assert_eq!(input.value(), "2024 Q3 win");
}

#[test]
fn custom_descriptor_in_code() {
    let table = TokenTable::new()
        .with(TokenDescriptor::numeric('h', 2, "hh", 12).unwrap())
        .with(TokenDescriptor::enumerated('p', "pm", &[("am", "a"), ("pm", "p")]).unwrap());

    let mut input = MaskedInput::new(
        CompiledFormat::compile("%h %p", &table).unwrap(),
        MemoryHost::new(),
    );
    assert_eq!(input.placeholder(), "hh pm");
    input.type_keys("7p");
    assert_eq!(input.value(), "07 pm");
}

#[test]
fn unknown_field_in_template() {
    let err = CompiledFormat::compile_builtin("%H:%M %Z").unwrap_err();
    assert!(matches!(err, MaskError::UnrecognizedField { code: 'Z', .. }));
    assert_eq!(err.to_string(), "unrecognized field '%Z' in template '%H:%M %Z'");
}

// ============================================================================
// Test: Split date/time
// ============================================================================

#[test]
fn split_date_time_halves_are_independent() {
    let pair = DateTimeMask::new(TokenTable::builtin(), None, None).unwrap();
    let mut date = MaskedInput::new(pair.date, MemoryHost::new());
    let mut time = MaskedInput::new(pair.time, MemoryHost::new());

    date.type_keys("31122024");
    time.type_keys("2359");
    time.type_keys(&BACKSPACE.to_string());

    assert_eq!(date.value(), "31/12/2024");
    assert_eq!(time.value(), "23:5");
    assert_eq!(date.format().last_len(), 10);
}
