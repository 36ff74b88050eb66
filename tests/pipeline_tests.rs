//! End-to-end: file on disk → coloured table → HTML page.

use std::io::Write;

use rusty_heat::band::{Band, BandMode, Deviation};
use rusty_heat::config::ResolvedConfig;
use rusty_heat::data::loader::load_file;
use rusty_heat::render::html::render_page;
use rusty_heat::{CellKind, GroupKey, HeatmapError, KeyPart, build_table, estimate_bands};

fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_json_single_group_end_to_end() {
    let file = write_temp(".json", r#"[{"a":"x","b":"y","c":"z","m1":10,"m2":20}]"#);
    let dataset = load_file(file.path()).unwrap();

    let bands = estimate_bands(&dataset, 3, Deviation::Population);
    let key = GroupKey::new(["x", "y", "z"]);
    assert_eq!(key.joined(), "xyz");
    assert_eq!(bands.get(&key).unwrap(), Band::new(10.0, 20.0));

    let table = build_table(&dataset, &ResolvedConfig::default()).unwrap();
    let row = &table.rows[0];
    assert_eq!(row[0].kind, CellKind::Label);
    assert_eq!(row[0].hex(), "#add8e6");
    assert_eq!(row[3].hex(), "#ff0000");
    assert_eq!(row[4].hex(), "#00ff00");

    let page = render_page(&table, "bench");
    assert!(page.contains("<th>m1</th>"));
    assert!(page.contains("background-color: #ff0000\">10</div>"));
    assert!(page.contains("background-color: #00ff00\">20</div>"));
}

#[test]
fn test_csv_fixed_band_end_to_end() {
    let file = write_temp(".csv", "pool,op,bs,run1,run2,run3\nssd,read,4k,20,100,181\n");
    let dataset = load_file(file.path()).unwrap();
    let config = ResolvedConfig {
        mode: BandMode::Fixed(Band::FIXED),
        ..ResolvedConfig::default()
    };
    let table = build_table(&dataset, &config).unwrap();
    let row = &table.rows[0];
    assert_eq!(row[3].hex(), "#ff0000");
    assert_eq!(row[4].hex(), "#fffd00");
    assert_eq!(row[5].hex(), "#00ff00");
}

#[test]
fn test_groups_with_colliding_concatenation_stay_separate() {
    let file = write_temp(
        ".csv",
        "a,b,c,m1,m2\nab,c,,0,10\na,bc,,100,200\n",
    );
    let dataset = load_file(file.path()).unwrap();
    let bands = estimate_bands(&dataset, 3, Deviation::Population);
    assert_eq!(bands.len(), 2);
    assert_eq!(
        bands
            .get(&GroupKey::new([KeyPart::from("ab"), "c".into(), KeyPart::Null]))
            .unwrap(),
        Band::new(0.0, 10.0)
    );
    assert_eq!(
        bands
            .get(&GroupKey::new([KeyPart::from("a"), "bc".into(), KeyPart::Null]))
            .unwrap(),
        Band::new(100.0, 200.0)
    );
}

#[test]
fn test_float_labels_differing_past_two_decimals_stay_separate() {
    let file = write_temp(".csv", "a,b,c,m1,m2\n1.001,y,z,0,10\n1.004,y,z,100,200\n");
    let dataset = load_file(file.path()).unwrap();
    let bands = estimate_bands(&dataset, 3, Deviation::Population);
    assert_eq!(bands.len(), 2);

    let table = build_table(&dataset, &ResolvedConfig::default()).unwrap();
    assert_eq!(table.rows[0][4].hex(), "#00ff00");
    assert_eq!(table.rows[1][3].hex(), "#ff0000");
    // both label cells still read "1.00"
    assert_eq!(table.rows[0][0].text, table.rows[1][0].text);
}

#[test]
fn test_zero_band_group_renders_grey() {
    let file = write_temp(".csv", "a,b,c,m1,m2\nx,y,z,0,0\n");
    let dataset = load_file(file.path()).unwrap();
    let table = build_table(&dataset, &ResolvedConfig::default()).unwrap();
    assert_eq!(table.rows[0][3].hex(), "#d3d3d3");
    assert_eq!(table.rows[0][4].hex(), "#d3d3d3");
}

#[test]
fn test_key_not_found_error_message() {
    let err = HeatmapError::KeyNotFound(GroupKey::new(["x", "y", "z"]));
    assert_eq!(err.to_string(), "no band recorded for group (x, y, z)");
}
