//! Tests for writing render artifacts to disk.

use heatmap::{render_chart, write_outputs, OutputPaths, RenderOutputs};
use heatmap_common::ChartConfig;
use renderer::HostDocument;
use tempfile::TempDir;

use test_utils::century_dataset;

// ============================================================================
// Helper functions
// ============================================================================

fn paths_in(dir: &TempDir, scale: f32) -> OutputPaths {
    OutputPaths {
        svg: dir.path().join("chart.svg"),
        png: Some(dir.path().join("chart.png")),
        html: Some(dir.path().join("index.html")),
        scale,
    }
}

fn rendered() -> heatmap::RenderedChart {
    let host = HostDocument::default_template().unwrap();
    render_chart(&century_dataset(), &ChartConfig::default(), &host).unwrap()
}

// ============================================================================
// Writing
// ============================================================================

#[tokio::test]
async fn test_writes_all_requested_files() {
    let dir = TempDir::new().unwrap();
    let paths = paths_in(&dir, 1.0);
    let rendered = rendered();

    write_outputs(&rendered, &paths).await.unwrap();

    let svg = std::fs::read_to_string(&paths.svg).unwrap();
    assert_eq!(svg, rendered.svg);

    let page = std::fs::read_to_string(paths.html.as_ref().unwrap()).unwrap();
    assert!(page.contains(&rendered.svg));

    let png = std::fs::read(paths.png.as_ref().unwrap()).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}

#[tokio::test]
async fn test_svg_only_when_nothing_else_requested() {
    let dir = TempDir::new().unwrap();
    let paths = OutputPaths {
        svg: dir.path().join("chart.svg"),
        png: None,
        html: None,
        scale: 0.0,
    };

    let outputs = RenderOutputs::produce(&rendered(), &paths).await.unwrap();
    assert_eq!(outputs.files.len(), 1);
    assert_eq!(outputs.files[0].0, paths.svg);
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_invalid_scale_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let paths = paths_in(&dir, 0.0);

    let err = write_outputs(&rendered(), &paths).await.unwrap_err();
    assert!(err.to_string().contains("invalid raster scale"), "got {}", err);

    assert!(!paths.svg.exists());
    assert!(!paths.html.as_ref().unwrap().exists());
    assert!(!paths.png.as_ref().unwrap().exists());
}

#[tokio::test]
async fn test_unwritable_path_is_error() {
    let dir = TempDir::new().unwrap();
    let paths = OutputPaths {
        svg: dir.path().join("missing").join("chart.svg"),
        png: None,
        html: None,
        scale: 1.0,
    };

    let err = write_outputs(&rendered(), &paths).await.unwrap_err();
    assert!(err.to_string().contains("Failed to write"), "got {}", err);
}
