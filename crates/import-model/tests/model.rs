use import_model::{
    ModelError, Row, SaveRequest, SaveResponse, Table, TargetField, TemplateType, UploadResponse,
};

#[test]
fn upload_response_tolerates_untyped_cells() {
    let json = r#"{
        "data": [
            {"Name": "Ada", "Qty": 3, "Note": null, "Active": true},
            {"Name": "Bob", "Qty": 4.5, "Note": "x", "Active": false}
        ],
        "emptyFields": ["Email", "Phone"],
        "targetFields": [{"name": "Qty", "validation": "^\\d+$"}]
    }"#;
    let response: UploadResponse = serde_json::from_str(json).expect("parse upload");

    assert_eq!(response.data.columns(), ["Name", "Qty", "Note", "Active"]);
    let first = &response.data.rows()[0];
    assert_eq!(first.get("Qty"), Some("3"));
    assert_eq!(first.get("Note"), Some(""));
    assert_eq!(first.get("Active"), Some("true"));
    assert_eq!(response.data.rows()[1].get("Qty"), Some("4.5"));
    assert_eq!(response.empty_fields, ["Email", "Phone"]);
    assert_eq!(response.target_fields, [TargetField::new("Qty", r"^\d+$")]);
    assert!(response.unmapped_columns.is_empty());
}

#[test]
fn nested_cells_are_rejected() {
    let json = r#"{"data": [{"Name": {"first": "Ada"}}]}"#;
    let err = serde_json::from_str::<UploadResponse>(json).unwrap_err();
    assert!(err.to_string().contains("nested value"));
}

#[test]
fn ragged_upload_fails_to_parse() {
    let json = r#"{"data": [{"a": "1"}, {"b": "2"}]}"#;
    let err = serde_json::from_str::<UploadResponse>(json).unwrap_err();
    assert!(err.to_string().contains("unexpected column 'b'"));
}

#[test]
fn unmapped_names_from_field_and_prefix() {
    let json = r#"{
        "data": [{"Name": "Ada", "Legacy": "x", "unmappedColumn3": "y"}],
        "unmappedColumns": [{"Legacy": "Legacy"}, {"ghost": "nowhere"}]
    }"#;
    let response: UploadResponse = serde_json::from_str(json).unwrap();
    let names: Vec<String> = response.unmapped_column_names().into_iter().collect();
    assert_eq!(names, ["Legacy", "unmappedColumn3"]);
}

#[test]
fn display_columns_skip_positional_keys() {
    let row: Row = [("0", "x"), ("Email", "a@b.co"), ("1", "y")]
        .into_iter()
        .collect();
    let table = Table::from_rows(vec![row]).unwrap();
    assert_eq!(table.display_columns(), ["Email"]);
    assert_eq!(table.columns().len(), 3);
}

#[test]
fn project_renames_and_drops() {
    let row: Row = [("colA", "1"), ("colB", "2"), ("colC", "3")]
        .into_iter()
        .collect();
    let table = Table::from_rows(vec![row]).unwrap();
    let projected = table.project(&[("colC", "Price"), ("colA", "colA")]).unwrap();
    assert_eq!(projected.columns(), ["Price", "colA"]);
    assert_eq!(projected.rows()[0].get("Price"), Some("3"));
    assert!(!projected.rows()[0].contains("colB"));

    let err = table.project(&[("missing", "x")]).unwrap_err();
    assert_eq!(err, ModelError::UnknownColumn("missing".to_string()));
}

#[test]
fn save_request_shape() {
    let row: Row = [("Email", "a@b.co"), ("Price", "12.5")].into_iter().collect();
    let table = Table::from_rows(vec![row]).unwrap();
    insta::assert_json_snapshot!(SaveRequest::template(&table, "weekly"), @r#"
    {
      "data": [
        {
          "Email": "a@b.co",
          "Price": "12.5"
        }
      ],
      "templateName": "weekly"
    }
    "#);
    let plain = serde_json::to_string(&SaveRequest::data(&table)).unwrap();
    assert_eq!(plain, r#"{"data":[{"Email":"a@b.co","Price":"12.5"}]}"#);
}

#[test]
fn save_response_variants() {
    let message: SaveResponse = serde_json::from_str(r#"{"message": "Saved"}"#).unwrap();
    assert!(!message.has_download());
    assert!(!message.is_rejected());

    let file: SaveResponse = serde_json::from_str(
        r#"{"data": "aGVsbG8=", "filename": "out.xlsx", "contentType": "application/octet-stream"}"#,
    )
    .unwrap();
    assert!(file.has_download());
    assert_eq!(file.content_type.as_deref(), Some("application/octet-stream"));

    let rejected: SaveResponse =
        serde_json::from_str(r#"{"success": false, "message": "nope"}"#).unwrap();
    assert!(rejected.is_rejected());
}

#[test]
fn template_type_parsing() {
    assert_eq!("Shopify".parse::<TemplateType>(), Ok(TemplateType::Shopify));
    assert_eq!(TemplateType::default(), TemplateType::Other);
    assert!(TemplateType::Other.notice().is_none());
    assert!(TemplateType::Amazon.notice().is_some());
    assert!("ebay".parse::<TemplateType>().is_err());
    assert_eq!(
        serde_json::to_string(&TemplateType::Amazon).unwrap(),
        r#""amazon""#
    );
}
