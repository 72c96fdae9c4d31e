//! Generate -> bake -> validate against real files on disk.

use gild_harness::{
    bake, read_ppm, run_generate, run_validate, scene_file_name, write_ppm, FailurePolicy,
    HarnessConfig, ReferenceTable,
};

const SCENE_COUNT: usize = 10;

#[test]
fn generated_images_validate_from_dir_and_table() {
    let dir = tempfile::tempdir().unwrap();
    let ppm_dir = dir.path().join("reference_ppm");
    let table_path = dir.path().join("reference_images.bin");
    let config = HarnessConfig::default();
    let (width, height) = (config.render.width, config.render.height);

    let mut log = String::new();
    let written = run_generate(&config, &ppm_dir, &mut log).unwrap();
    assert_eq!(written.len(), SCENE_COUNT);
    assert_eq!(log, "Rendering Scenes\n");
    for (scene, path) in written.iter().enumerate() {
        assert_eq!(path, &ppm_dir.join(scene_file_name(scene)));
        let bytes = std::fs::read(path).unwrap();
        assert!(bytes.starts_with(b"P6\n640 480\n255\n"));
        assert_eq!(bytes.len(), 15 + 640 * 480 * 3);
    }

    let baked = bake(&ppm_dir, &table_path, width, height).unwrap();
    assert_eq!(baked, SCENE_COUNT);

    for source in [&ppm_dir, &table_path] {
        let table = ReferenceTable::load(source, width, height).unwrap();
        assert!(table.is_complete());

        let mut log = String::new();
        let report = run_validate(&config, &table, &mut log).unwrap();

        assert!(report.is_success(), "{:?}", report);
        assert_eq!(report.passed, (0..SCENE_COUNT).collect::<Vec<_>>());
        assert!(log.starts_with("Rendering Scenes\nscene 0 Pass\n"));
        assert!(log.ends_with("scene 9 Pass\nTEST PASS\n"));
    }
}

#[test]
fn edited_reference_fails_validation() {
    let dir = tempfile::tempdir().unwrap();
    let config = HarnessConfig::default().with_scene(5).unwrap();
    let (width, height) = (config.render.width, config.render.height);

    let written = run_generate(&config, dir.path(), &mut String::new()).unwrap();
    let mut image = read_ppm(&written[0]).unwrap();
    let center = ((240 * width as usize) + 320) * 3;
    image.pixels[center] = image.pixels[center].wrapping_add(1);
    write_ppm(&written[0], image.width, image.height, &image.pixels).unwrap();

    let table = ReferenceTable::from_dir(dir.path(), width, height).unwrap();
    let mut log = String::new();
    let report = run_validate(
        &config.with_policy(FailurePolicy::Continue),
        &table,
        &mut log,
    )
    .unwrap();

    assert!(!report.is_success());
    let first = report.first_failure.unwrap();
    assert_eq!(first.scene, 5);
    assert_eq!(first.offset, center);
    assert_eq!(first.pixel(width), (320, 240));
    assert!(log.ends_with("TEST FAIL\n"));
}

#[test]
fn bake_refuses_incomplete_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config = HarnessConfig::default().with_scene(0).unwrap();
    run_generate(&config, dir.path(), &mut String::new()).unwrap();

    let table_path = dir.path().join("table.bin");
    let result = bake(dir.path(), &table_path, 640, 480);

    assert!(result.is_err());
    assert!(!table_path.exists());
}
