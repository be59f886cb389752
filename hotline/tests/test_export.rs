use hotline::export::ReportExporter;
use hotline::report::parse_str;
use std::fs::File;
use std::io::BufWriter;

fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path}: {e}"))
}

#[test]
fn test_export_creates_valid_json() {
    let profiles = parse_str(&fixture("two_functions.txt")).unwrap();
    let exporter = ReportExporter::new(&profiles, 1.0);
    let mut buffer = Vec::new();

    exporter.export(&mut buffer).expect("Failed to export report");

    let json_str = String::from_utf8(buffer).expect("Invalid UTF-8");
    let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("Invalid JSON");

    assert_eq!(parsed["num_stddev"], 1.0);
    let functions = parsed["functions"].as_array().expect("functions array");
    assert_eq!(functions.len(), 2);
    assert_eq!(functions[0]["func_name"], "crunch");
    assert_eq!(functions[1]["func_name"], "main");
    assert_eq!(functions[0]["lines"].as_array().unwrap().len(), 6);
}

#[test]
fn test_export_hot_flags_match_hot_lines() {
    let profiles = parse_str(&fixture("two_functions.txt")).unwrap();
    let mut buffer = Vec::new();
    ReportExporter::new(&profiles, 1.0).export(&mut buffer).unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

    let hot: Vec<u64> = parsed["functions"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|f| f["lines"].as_array().unwrap().iter())
        .filter(|l| l["hot"] == true)
        .map(|l| l["line_number"].as_u64().unwrap())
        .collect();
    assert_eq!(hot, vec![7, 14]);
}

#[test]
fn test_export_to_file() {
    let profiles = parse_str(&fixture("never_run.txt")).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");

    let file = File::create(&path).unwrap();
    ReportExporter::new(&profiles, 1.0).export(BufWriter::new(file)).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed["functions"][0]["never_run"], true);
    assert_eq!(parsed["functions"][0]["threshold"], 0.0);
}
