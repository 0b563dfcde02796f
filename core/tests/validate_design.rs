use designval_core::runtime::{
    invalid_enum_value_error, invalid_length_error, invalid_param_type_error,
    missing_attribute_error, Bound, ErrorKind,
};
use designval_core::{validate_api, ApiDefinition, AppError, ErrorValue};
use pretty_assertions::assert_eq;

const BROKEN_DESIGN: &str = r#"
name: cellar
resources:
  - name: bottles
    base_path: /bottles/{id}
    canonical_action_name: index
    actions:
      - name: show
        routes:
          - {verb: GET, path: "/"}
        responses:
          - {name: OK, status: 200}
          - {name: Found, status: 200}
media_types:
  - name: Bottle
    type:
      object:
        id: {type: {primitive: integer}}
    links:
      - name: id
"#;

fn load(yaml: &str) -> ApiDefinition {
    let mut api: ApiDefinition = serde_yaml::from_str(yaml).unwrap();
    api.attach_parents();
    api
}

#[test]
fn test_reports_every_problem_in_order() {
    let mut api = load(BROKEN_DESIGN);
    let verr = validate_api(&mut api).unwrap_err();

    let expected = r#"resource "bottles": unknown canonical action "index"
resource "bottles": BasePath uses variables id but no BaseParams are defined
response "Found": Multiple response definitions with status code 200
link "id" of media type "Bottle": attribute type must be a media type"#;
    assert_eq!(verr.to_string(), expected);
}

#[test]
fn test_defaults_survive_revalidation() {
    let mut api = load(BROKEN_DESIGN);
    let first = validate_api(&mut api).unwrap_err();
    assert_eq!(api.media_types[0].identifier, "plain/text");

    let second = validate_api(&mut api).unwrap_err();
    assert_eq!(first, second);
}

#[test]
fn test_design_errors_lift_into_app_error() {
    let mut api = load(BROKEN_DESIGN);
    let err = AppError::from(validate_api(&mut api).unwrap_err());
    let text = err.to_string();
    assert!(text.starts_with("Invalid design:\nresource \"bottles\""));
    assert_eq!(text.lines().count(), 5);
}

#[test]
fn test_decoding_errors_accumulate() {
    // What generated decoding code does for `?vintage=old` on a payload
    // missing `name` with a bad color and a too short label.
    let mut err: Option<ErrorValue> = None;
    err = Some(invalid_param_type_error("vintage", "old", "integer", err));
    err = Some(missing_attribute_error("request body", "name", err));
    err = Some(invalid_enum_value_error(
        "request body.color",
        "blue",
        &["red", "white"],
        err,
    ));
    let err = invalid_length_error("request body.label", "ab", 3, Bound::Minimum, err);

    let kinds: Vec<ErrorKind> = err
        .failures()
        .iter()
        .map(|f| f.as_typed().unwrap().kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            ErrorKind::InvalidParamType,
            ErrorKind::MissingAttribute,
            ErrorKind::InvalidEnumValue,
            ErrorKind::InvalidRange,
        ]
    );

    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"kind": "invalid parameter value", "msg": "invalid value \"old\" for parameter \"vintage\", must be a integer"},
            {"kind": "missing required attribute", "msg": "attribute \"name\" of request body is missing and required"},
            {"kind": "invalid value", "msg": "value of request body.color must be one of \"red\", \"white\" but got value \"blue\""},
            {"kind": "invalid value range", "msg": "length of request body.label must be greater than or equal to 3 but got value \"ab\""},
        ])
    );
}
