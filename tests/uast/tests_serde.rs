use uast::{NormalizerConfig, normalize_source};

use crate::helpers::source_fixtures::DIRECTION;

#[test]
fn test_normalization_serializes_to_json() {
    let file = normalize_source(DIRECTION, &NormalizerConfig::default());
    let result = file.find("Direction").unwrap();
    let value = serde_json::to_value(result).unwrap();

    let root = &value["root"];
    assert_eq!(root["kind"], "EnumDeclaration");
    assert_eq!(root["token"], "Direction");
    let roles: Vec<_> = root["roles"].as_array().unwrap().iter().filter_map(|r| r.as_str()).collect();
    assert!(roles.contains(&"Enumeration"));

    let constant = &root["children"][1];
    assert_eq!(constant["kind"]["EnumConstant"]["ordinal"], 0);
    assert_eq!(constant["span"]["start"]["line"], 2);

    let links = value["links"].as_array().unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(links[0]["key"]["name"], "opposite");
    assert_eq!(links[0]["constant"], "UP");
    assert_eq!(links[0]["abstract_path"], serde_json::json!([3]));
    assert_eq!(value["supertype"], "java.lang.Enum");
}
