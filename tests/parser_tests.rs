// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use pcb_stackup::parser::*;
use pcb_stackup::DEFAULT_THICKNESS_INPUT;

#[test]
fn test_parse_default_board() {
    let values = parse_thicknesses(DEFAULT_THICKNESS_INPUT).unwrap();
    assert_eq!(
        values,
        vec![0.01, 0.0175, 0.196, 0.035, 1.03, 0.035, 0.196, 0.0175, 0.01]
    );
}

#[test]
fn test_parse_preserves_order() {
    let values = parse_thicknesses("3, 1, 2").unwrap();
    assert_eq!(values, vec![3.0, 1.0, 2.0]);
}

#[test]
fn test_parse_accepts_zero_and_negative() {
    let values = parse_thicknesses("0,-0.5,2").unwrap();
    assert_eq!(values, vec![0.0, -0.5, 2.0]);
}

#[test]
fn test_parse_tolerates_spacing_and_blank_entries() {
    let values = parse_thicknesses("  1 ,, 2 ,\t3 , ").unwrap();
    assert_eq!(values, vec![1.0, 2.0, 3.0]);
    assert!(parse_thicknesses("").unwrap().is_empty());
    assert!(parse_thicknesses(" , ,").unwrap().is_empty());
}

#[test]
fn test_first_bad_entry_is_reported() {
    let err = parse_thicknesses("1,2,x,y").unwrap_err();
    assert_eq!(err.token(), "x");
    assert_eq!(err.position(), 3);

    let message = err.to_string();
    assert!(message.contains("'x'"));
    assert!(message.contains("Please enter valid numbers separated by commas."));
}

#[test]
fn test_units_are_not_accepted() {
    let err = parse_thicknesses("1mm,2").unwrap_err();
    assert!(matches!(err, ParseError::InvalidNumber { .. }));
    assert_eq!(err.token(), "1mm");
    assert_eq!(err.position(), 1);
}

#[test]
fn test_custom_delimiter() {
    let parser = ThicknessParser::with_delimiter(';');
    assert_eq!(parser.parse("1;2.5").unwrap(), vec![1.0, 2.5]);
    assert!(parser.parse("1,2").is_err());
}
