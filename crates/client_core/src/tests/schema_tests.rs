use super::*;

fn check(field: FieldName, raw: &str) -> Result<FieldValue, FieldError> {
    validate_raw(field.spec(), raw)
}

#[test]
fn table_is_in_form_order() {
    for (spec, name) in FIELD_SPECS.iter().zip(FieldName::ALL) {
        assert_eq!(spec.name, name);
        assert_eq!(name.spec().name, name);
    }
}

#[test]
fn age_accepts_only_integers_between_16_and_100() {
    for age in 16..=100 {
        assert_eq!(
            check(FieldName::Age, &age.to_string()),
            Ok(FieldValue::Integer(age))
        );
    }
    for raw in ["15", "101", "0", "-20", "21.5", "veinte", "NaN", "inf"] {
        let err = check(FieldName::Age, raw).expect_err(raw);
        assert_eq!(err.field, FieldName::Age);
        assert_eq!(
            err.message,
            "La edad debe ser un número entero entre 16 y 100"
        );
    }
}

#[test]
fn integral_decimal_text_is_an_integer() {
    assert_eq!(check(FieldName::Age, "21.0"), Ok(FieldValue::Integer(21)));
    assert_eq!(check(FieldName::Age, " 30 "), Ok(FieldValue::Integer(30)));
    assert_eq!(check(FieldName::YearOfStudy, "2.00"), Ok(FieldValue::Integer(2)));
}

#[test]
fn exponent_and_bare_point_forms_are_not_integers() {
    for raw in ["1e2", "1.6e1", "2E1", "21.", ".0", "21.05"] {
        let err = check(FieldName::Age, raw).expect_err(raw);
        assert_eq!(err.message, FieldName::Age.spec().invalid_message, "{raw}");
    }
    assert!(check(FieldName::YearOfStudy, "1e0").is_err());
}

#[test]
fn choice_fields_use_the_domain_label_tables() {
    let options = |field: FieldName| match field.spec().kind {
        FieldKind::Choice { options, .. } => options,
        other => panic!("{field} is not a choice: {other:?}"),
    };
    assert_eq!(options(FieldName::Gender), Gender::LABELS);
    assert_eq!(options(FieldName::Course), Course::LABELS);
    assert_eq!(options(FieldName::Married), YesNo::LABELS);
    assert_eq!(options(FieldName::SpecializedTreatment), YesNo::LABELS);
}

#[test]
fn empty_input_reports_required_message() {
    let err = check(FieldName::Gender, "   ").expect_err("empty gender");
    assert_eq!(err.message, "Por favor selecciona un género");

    let err = check(FieldName::Course, "").expect_err("empty course");
    assert_eq!(err.message, "Por favor selecciona un curso");

    let err = check(FieldName::Married, "").expect_err("empty married");
    assert_eq!(err.message, "Por favor selecciona una opción");
}

#[test]
fn year_of_study_bounds_are_inclusive() {
    assert_eq!(check(FieldName::YearOfStudy, "1"), Ok(FieldValue::Integer(1)));
    assert_eq!(check(FieldName::YearOfStudy, "10"), Ok(FieldValue::Integer(10)));
    assert!(check(FieldName::YearOfStudy, "0").is_err());
    assert!(check(FieldName::YearOfStudy, "11").is_err());
}

#[test]
fn cgpa_accepts_decimals_in_range() {
    assert_eq!(check(FieldName::Cgpa, "0"), Ok(FieldValue::Decimal(0.0)));
    assert_eq!(check(FieldName::Cgpa, "7.5"), Ok(FieldValue::Decimal(7.5)));
    assert_eq!(check(FieldName::Cgpa, "10"), Ok(FieldValue::Decimal(10.0)));
    for raw in ["10.01", "-0.5", "NaN", "infinity", "siete"] {
        assert!(check(FieldName::Cgpa, raw).is_err(), "{raw}");
    }
}

#[test]
fn course_accepts_label_or_index() {
    assert_eq!(check(FieldName::Course, "Derecho"), Ok(FieldValue::Choice(3)));
    assert_eq!(check(FieldName::Course, "3"), Ok(FieldValue::Choice(3)));
    assert_eq!(check(FieldName::Course, "14"), Ok(FieldValue::Choice(14)));
    assert!(check(FieldName::Course, "15").is_err());
    assert!(check(FieldName::Course, "derecho").is_err());
}

#[test]
fn gender_rejects_index_and_unknown_labels() {
    assert_eq!(check(FieldName::Gender, "Femenino"), Ok(FieldValue::Choice(1)));
    let err = check(FieldName::Gender, "1").expect_err("index not accepted");
    assert_eq!(err.message, "Género no reconocido");
    assert!(check(FieldName::Gender, "Otro").is_err());
}

#[test]
fn yes_no_fields_share_labels() {
    for field in [FieldName::Married, FieldName::SpecializedTreatment] {
        assert_eq!(check(field, "Sí"), Ok(FieldValue::Choice(0)));
        assert_eq!(check(field, "No"), Ok(FieldValue::Choice(1)));
        assert!(check(field, "Si").is_err());
    }
}

#[test]
fn choice_values_resolve_to_domain_enums() {
    assert_eq!(
        FieldValue::Choice(3).as_choice::<Course>(),
        Some(Course::Law)
    );
    assert_eq!(FieldValue::Choice(2).as_choice::<Gender>(), None);
    assert_eq!(FieldValue::Integer(4).as_choice::<YesNo>(), None);
    assert_eq!(FieldValue::Integer(4).as_decimal(), Some(4.0));
}
