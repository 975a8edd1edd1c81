use solidscript::{
    config::{BindingMode, EvalConfig},
    render_file,
};
use walkdir::WalkDir;

fn demo_files() -> Vec<std::path::PathBuf> {
    WalkDir::new("demos").into_iter()
                         .filter_map(Result::ok)
                         .filter(|e| e.path().extension().is_some_and(|ext| ext == "scad"))
                         .map(|e| e.path().to_path_buf())
                         .collect()
}

#[test]
fn demos_render_geometry() {
    let files = demo_files();
    assert!(!files.is_empty(), "No demos found in demos/");

    for path in files {
        match render_file(&path, &EvalConfig::default()) {
            Ok(Some(_)) => {},
            Ok(None) => panic!("Demo {path:?} produced no geometry"),
            Err(e) => panic!("Demo {path:?} failed:\n{e}"),
        }
    }
}

#[test]
fn demos_render_the_same_under_dynamic_binding() {
    let dynamic = EvalConfig { binding: BindingMode::Dynamic,
                               ..EvalConfig::default() };

    for path in demo_files() {
        let static_tree = render_file(&path, &EvalConfig::default()).unwrap_or_else(|e| panic!("{path:?}: {e}"));
        let dynamic_tree = render_file(&path, &dynamic).unwrap_or_else(|e| panic!("{path:?}: {e}"));
        assert_eq!(static_tree, dynamic_tree, "{path:?}");
    }
}
