// USDA document structure for scenes generated from the fixture extract
use osm_usda::{
    generate_scene, scene_to_file, scene_to_string, BBox, HighwayFilter, OverpassExtract, Scene,
    SceneConfig,
};

fn fixture_scene(config: &SceneConfig) -> Scene {
    let bbox: BBox = "48.85,2.34,48.86,2.36".parse().expect("valid bbox");
    let filter = HighwayFilter::new(&config.highway_filter).expect("valid filter");
    let data = OverpassExtract::from_file("tests/fixtures/small_extract.json")
        .expect("Failed to load fixture")
        .into_map_data(&filter, config.include_buildings);
    generate_scene(&data, &bbox, config).expect("Failed to generate scene").0
}

/// Numbers between `<decl> = [` and the closing `]` of an int array
fn int_array(text: &str, decl: &str) -> Vec<u32> {
    let start = text.find(decl).expect("array present") + decl.len();
    let body = &text[start..];
    let end = body.find(']').expect("array closed");
    body[..end]
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().expect("integer"))
        .collect()
}

#[test]
fn test_document_layout() {
    let text = scene_to_string(&fixture_scene(&SceneConfig::default()));

    assert!(text.starts_with(
        "#usda 1.0\n(\n    defaultPrim = \"World\"\n    metersPerUnit = 1.0\n    upAxis = \"Y\"\n)\n\ndef Xform \"World\" {\n"
    ));
    assert!(text.ends_with("    }\n}\n"));

    let roads = text.find("def Mesh \"Roads\"").expect("Roads");
    let lanes = text.find("def Mesh \"Lanes\"").expect("Lanes");
    let buildings = text.find("def Mesh \"Buildings\"").expect("Buildings");
    assert!(roads < lanes && lanes < buildings);
    assert_eq!(text.matches("def Mesh").count(), 3);

    assert!(text.contains("color3f[] primvars:displayColor = [(0.380, 0.400, 0.440)]"));
    assert!(text.contains("color3f[] primvars:displayColor = [(0.940, 0.920, 0.780)]"));
    assert!(text.contains("color3f[] primvars:displayColor = [(0.250, 0.330, 0.500)]"));
    assert_eq!(text.matches("uniform token normals:interpolation = \"vertex\"").count(), 3);
}

#[test]
fn test_field_order_within_mesh() {
    let text = scene_to_string(&fixture_scene(&SceneConfig::default()));
    let mesh = &text[text.find("def Mesh \"Buildings\"").unwrap()..];

    let fields = [
        "float3[] extent",
        "bool doubleSided = 1",
        "uniform token subdivisionScheme = \"none\"",
        "int[] faceVertexCounts",
        "int[] faceVertexIndices",
        "point3f[] points",
        "normal3f[] normals",
        "uniform token normals:interpolation",
        "color3f[] primvars:displayColor",
        "uniform token primvars:displayColor:interpolation = \"constant\"",
    ];
    let positions: Vec<usize> = fields
        .iter()
        .map(|f| mesh.find(f).unwrap_or_else(|| panic!("missing {}", f)))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{:?}", positions);

    assert_eq!(int_array(mesh, "int[] faceVertexCounts = ["), vec![3, 3, 3]);
    let indices = int_array(mesh, "int[] faceVertexIndices = [");
    assert_eq!(indices.len(), 9);
    assert!(indices.iter().all(|&i| i < 8));
}

#[test]
fn test_empty_meshes_are_skipped() {
    let config = SceneConfig { lane_width: 0.0, include_buildings: false, ..Default::default() };
    let text = scene_to_string(&fixture_scene(&config));
    assert_eq!(text.matches("def Mesh").count(), 1);
    assert!(!text.contains("Lanes"));
    assert!(!text.contains("Buildings"));

    let counts = int_array(&text, "int[] faceVertexCounts = [");
    assert_eq!(counts, vec![4, 4, 4, 4]);
    assert_eq!(int_array(&text, "int[] faceVertexIndices = [").len(), 16);
}

#[test]
fn test_points_use_three_decimals() {
    let text = scene_to_string(&fixture_scene(&SceneConfig::default()));
    let start = text.find("point3f[] points = [\n").unwrap() + "point3f[] points = [\n".len();
    let first_line = text[start..].lines().next().unwrap().trim();

    assert!(first_line.starts_with('(') && first_line.ends_with("),"));
    for value in first_line.trim_start_matches('(').trim_end_matches("),").split(", ") {
        let decimals = value.split('.').nth(1).expect("decimal point");
        assert_eq!(decimals.len(), 3, "{}", value);
    }
}

#[test]
fn test_output_is_stable_and_matches_file() {
    let config = SceneConfig::default();
    let first = scene_to_string(&fixture_scene(&config));
    let second = scene_to_string(&fixture_scene(&config));
    assert_eq!(first, second);

    let dir = std::env::temp_dir().join(format!("osm_usda_output_test_{}", std::process::id()));
    let path = dir.join("data").join("paris_roads.usda");
    scene_to_file(&fixture_scene(&config), &path).expect("Failed to write scene");
    let written = std::fs::read_to_string(&path).expect("Failed to read scene back");
    assert_eq!(written, first);
    std::fs::remove_dir_all(&dir).ok();
}
