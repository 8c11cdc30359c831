use std::collections::HashSet;
use std::path::Path;

const TAG_FIELDS: [&str; 4] = ["types", "sports", "muscle_targets", "equipment"];

fn main() {
    let catalog_path = Path::new("catalogs/default_exercises.json");
    validate_catalog_file(catalog_path);
    set_build_dependencies();
}

fn validate_catalog_file(catalog_path: &Path) {
    // Ensure catalog exists at build time
    assert!(
        catalog_path.exists(),
        "\n\nCATALOG BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the default exercise catalog before building.\n",
        catalog_path.display()
    );

    let catalog_contents = std::fs::read_to_string(catalog_path).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            catalog_path.display()
        );
    });

    let catalog: serde_json::Value = serde_json::from_str(&catalog_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            catalog_path.display()
        );
    });

    validate_catalog_structure(&catalog);
}

fn validate_catalog_structure(catalog: &serde_json::Value) {
    assert!(
        catalog.is_object(),
        "\n\nCATALOG BUILD ERROR: Root must be a JSON object\n\
         Got: {catalog}\n"
    );

    let exercises = catalog.get("exercises").unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Missing 'exercises' field\n\
             The catalog must have a top-level 'exercises' array.\n"
        );
    });

    let exercises = exercises.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: 'exercises' must be an array\n\
             Got: {exercises}\n"
        );
    });

    assert!(
        !exercises.is_empty(),
        "\n\nCATALOG BUILD ERROR: 'exercises' must not be empty\n"
    );

    let mut names = HashSet::new();
    for (i, exercise) in exercises.iter().enumerate() {
        let name = validate_exercise(exercise, i);
        assert!(
            names.insert(name.to_string()),
            "\n\nCATALOG BUILD ERROR: Duplicate exercise name '{name}' (index {i})\n\
             Exercise names must be unique.\n"
        );
    }

    println!(
        "cargo:warning=Validated exercise catalog: {} exercises",
        exercises.len()
    );
}

fn validate_exercise(exercise: &serde_json::Value, index: usize) -> &str {
    let name = exercise
        .get("name")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_else(|| {
            panic!("\n\nCATALOG BUILD ERROR: Exercise at index {index} missing 'name' field\n");
        });

    for field in TAG_FIELDS {
        let tags = exercise.get(field).and_then(|v| v.as_array());
        assert!(
            tags.is_some(),
            "\n\nCATALOG BUILD ERROR: Exercise '{name}' (index {index}) missing '{field}' array\n"
        );
        if let Some(tags) = tags {
            assert!(
                tags.iter().all(serde_json::Value::is_string),
                "\n\nCATALOG BUILD ERROR: Exercise '{name}' field '{field}' must only contain strings\n"
            );
        }
    }

    assert!(
        exercise
            .get("reference_link")
            .and_then(serde_json::Value::as_str)
            .is_some(),
        "\n\nCATALOG BUILD ERROR: Exercise '{name}' (index {index}) missing 'reference_link' field\n"
    );

    name
}

fn set_build_dependencies() {
    // Tell cargo to rerun if catalog changes
    println!("cargo:rerun-if-changed=catalogs/default_exercises.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
