use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use image::{GrayImage, Rgb, RgbImage};
use rf_core::{Image, PixelCoord};
use rf_morph::{ThinningConfig, binarize_u8, thin_binary_u8};
use rf_skeleton::{
    AnalyzeConfig, RamificationConfig, SkeletonAnalysis, SkeletonMask, analyze, render_labels,
};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "RAMIFY_LOG";

const END_POINT_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
const JUNCTION_COLOR: Rgb<u8> = Rgb([128, 0, 128]);
const SLAB_COLOR: Rgb<u8> = Rgb([255, 165, 0]);

const REPORT_HEADER: [&str; 7] = [
    "Cell ID",
    "Region",
    "Group",
    "# Branches",
    "# End Point Voxels",
    "# Junction Voxels",
    "# Slab Voxels",
];

#[derive(Parser, Debug)]
#[command(name = "rf_gallery")]
#[command(about = "Classify skeleton pixels and count ramifications in segmented cell images")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(name = "analyze")]
    Analyze(AnalyzeArgs),
    #[command(name = "batch")]
    Batch(BatchArgs),
}

#[derive(Args, Debug, Clone)]
struct PipelineArgs {
    /// Treat the input as an existing skeleton and skip thinning.
    #[arg(long, default_value_t = false)]
    no_thin: bool,
    /// Cap on thinning passes; unbounded when omitted.
    #[arg(long)]
    max_thin_iterations: Option<usize>,
    /// Cap on traversal steps per end point; unbounded when omitted.
    #[arg(long)]
    max_steps: Option<usize>,
}

#[derive(Args, Debug, Clone)]
struct AnalyzeArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value = "out")]
    out: PathBuf,
    #[command(flatten)]
    pipeline: PipelineArgs,
}

#[derive(Args, Debug, Clone)]
struct BatchArgs {
    /// Folder whose subfolders hold one PNG per cell.
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, required = true)]
    region: String,
    #[arg(long, required = true)]
    group: String,
    /// Defaults to `<input>/Analyze Skeleton <group> <region>`.
    #[arg(long)]
    out: Option<PathBuf>,
    #[command(flatten)]
    pipeline: PipelineArgs,
}

#[derive(Debug, Clone, Serialize)]
struct PointDto {
    x: usize,
    y: usize,
}

#[derive(Debug, Clone, Serialize)]
struct ResultDto {
    cell_id: String,
    width: usize,
    height: usize,
    ramifications: usize,
    num_end_points: usize,
    num_junctions: usize,
    num_slabs: usize,
    end_points: Vec<PointDto>,
    junctions: Vec<PointDto>,
    slabs: Vec<PointDto>,
}

#[derive(Debug, Clone, Serialize)]
struct MetaAnalyze {
    pixel_rule: &'static str,
    thinning: &'static str,
    max_thin_iterations: Option<usize>,
    connectivity: &'static str,
    max_steps: Option<usize>,
}

struct CellOutcome {
    cell_id: String,
    skeleton: SkeletonMask,
    labels: Image<u8>,
    analysis: SkeletonAnalysis,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.cmd {
        Command::Analyze(args) => run_analyze(args),
        Command::Batch(args) => run_batch(args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    ensure_file_exists(&args.input, "input")?;

    let outcome = analyze_cell(&args.input, &args.pipeline)?;
    let case_dir = args.out.join(&outcome.cell_id);
    fs::create_dir_all(&case_dir)
        .with_context(|| format!("creating output directory {}", case_dir.display()))?;

    save_u8_image(case_dir.join("skeleton.png"), &outcome.skeleton.to_image_u8())?;
    save_u8_image(case_dir.join("segmented.png"), &outcome.labels)?;
    render_overlay(&outcome.labels, &outcome.analysis)
        .save(case_dir.join("overlay.png"))
        .context("writing overlay.png")?;

    write_json(case_dir.join("result.json"), &result_dto(&outcome))?;
    write_json(case_dir.join("meta.json"), &meta_dto(&args.pipeline))?;

    info!(
        cell = %outcome.cell_id,
        end_points = outcome.analysis.num_end_points(),
        junctions = outcome.analysis.num_junctions(),
        slabs = outcome.analysis.num_slabs(),
        ramifications = outcome.analysis.ramifications,
        out = %case_dir.display(),
        "analysis written"
    );

    Ok(())
}

fn run_batch(args: BatchArgs) -> Result<()> {
    if !args.input.is_dir() {
        bail!("input folder does not exist: {}", args.input.display());
    }

    let out_root = args.out.clone().unwrap_or_else(|| {
        args.input
            .join(format!("Analyze Skeleton {} {}", args.group, args.region))
    });

    // Listed before the output root is created, which may live inside `input`.
    let subfolders = sorted_entries(&args.input, |p| p.is_dir() && p != out_root.as_path())?;

    fs::create_dir_all(&out_root)
        .with_context(|| format!("creating output directory {}", out_root.display()))?;

    let mut rows: Vec<Vec<String>> = Vec::new();
    for sub in &subfolders {
        let sub_name = sub
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .with_context(|| format!("folder has no name: {}", sub.display()))?;
        let cell_dir = out_root.join(format!("{sub_name}_Skeletonize"));
        fs::create_dir_all(&cell_dir)
            .with_context(|| format!("creating output directory {}", cell_dir.display()))?;

        let images = sorted_entries(sub, |p| {
            p.is_file() && p.extension().is_some_and(|e| e.eq_ignore_ascii_case("png"))
        })?;
        debug!(folder = %sub.display(), images = images.len(), "scanning folder");

        for path in &images {
            let outcome = analyze_cell(path, &args.pipeline)?;
            let id = &outcome.cell_id;

            save_u8_image(
                cell_dir.join(format!("Skeletonize_{id}.png")),
                &outcome.skeleton.to_image_u8(),
            )?;
            save_u8_image(cell_dir.join(format!("Segmented_{id}.png")), &outcome.labels)?;
            render_overlay(&outcome.labels, &outcome.analysis)
                .save(cell_dir.join(format!("Visualization_{id}.png")))
                .with_context(|| format!("writing visualization for {id}"))?;

            info!(
                cell = %id,
                ramifications = outcome.analysis.ramifications,
                "cell analyzed"
            );

            rows.push(vec![
                id.clone(),
                args.region.clone(),
                args.group.clone(),
                outcome.analysis.ramifications.to_string(),
                outcome.analysis.num_end_points().to_string(),
                outcome.analysis.num_junctions().to_string(),
                outcome.analysis.num_slabs().to_string(),
            ]);
        }
    }

    let report = out_root.join(format!(
        "Analyze_Skeleton_{}_{}.csv",
        args.region, args.group
    ));
    write_report_csv(report.clone(), &rows)?;
    write_json(out_root.join("meta.json"), &meta_dto(&args.pipeline))?;

    info!(
        cells = rows.len(),
        report = %report.display(),
        "skeleton analysis saved"
    );

    Ok(())
}

fn analyze_cell(path: &Path, pipeline: &PipelineArgs) -> Result<CellOutcome> {
    let cell_id = file_stem_string(path)?;
    let img = load_input_u8(path)?;

    let binary = binarize_u8(&img.as_view());
    let skeleton_img = if pipeline.no_thin {
        binary
    } else {
        thin_binary_u8(
            &binary.as_view(),
            &ThinningConfig {
                max_iterations: pipeline.max_thin_iterations,
            },
        )
    };
    let skeleton = SkeletonMask::from_u8(&skeleton_img.as_view());

    let cfg = AnalyzeConfig {
        ramification: RamificationConfig {
            max_steps: pipeline.max_steps,
        },
    };
    let analysis = analyze(&skeleton, &cfg)
        .with_context(|| format!("analyzing skeleton of {}", path.display()))?;
    let labels = render_labels(&skeleton, &analysis.classification);

    Ok(CellOutcome {
        cell_id,
        skeleton,
        labels,
        analysis,
    })
}

fn load_input_u8(path: &Path) -> Result<Image<u8>> {
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    let luma = dyn_img.to_luma8();
    let (w, h) = luma.dimensions();
    let data = luma.into_raw();

    Image::from_vec(w as usize, h as usize, data)
        .with_context(|| format!("constructing image buffer from {}", path.display()))
}

fn save_u8_image(path: PathBuf, img: &Image<u8>) -> Result<()> {
    let gray = GrayImage::from_raw(img.width() as u32, img.height() as u32, img.data().to_vec())
        .context("constructing GrayImage from raw bytes")?;
    gray.save(&path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn render_overlay(labels: &Image<u8>, analysis: &SkeletonAnalysis) -> RgbImage {
    let mut rgb = RgbImage::from_fn(labels.width() as u32, labels.height() as u32, |x, y| {
        let v = labels.get(x as usize, y as usize).copied().unwrap_or(0);
        Rgb([v, v, v])
    });

    let classes = &analysis.classification;
    for &p in &classes.slabs {
        put_marker(&mut rgb, p, 0, SLAB_COLOR);
    }
    for &p in &classes.end_points {
        put_marker(&mut rgb, p, 1, END_POINT_COLOR);
    }
    for &p in &classes.junctions {
        put_marker(&mut rgb, p, 1, JUNCTION_COLOR);
    }

    rgb
}

fn put_marker(img: &mut RgbImage, p: PixelCoord, radius: i64, color: Rgb<u8>) {
    let (x, y) = p.xy();
    let (xi, yi) = (x as i64, y as i64);

    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let nx = xi + dx;
            let ny = yi + dy;
            if nx < 0 || ny < 0 {
                continue;
            }
            let (ux, uy) = (nx as u32, ny as u32);
            if ux >= img.width() || uy >= img.height() {
                continue;
            }
            img.put_pixel(ux, uy, color);
        }
    }
}

fn result_dto(outcome: &CellOutcome) -> ResultDto {
    let a = &outcome.analysis;
    let points = |pts: &[PixelCoord]| {
        pts.iter()
            .map(|p| {
                let (x, y) = p.xy();
                PointDto { x, y }
            })
            .collect::<Vec<_>>()
    };

    ResultDto {
        cell_id: outcome.cell_id.clone(),
        width: a.width,
        height: a.height,
        ramifications: a.ramifications,
        num_end_points: a.num_end_points(),
        num_junctions: a.num_junctions(),
        num_slabs: a.num_slabs(),
        end_points: points(&a.classification.end_points),
        junctions: points(&a.classification.junctions),
        slabs: points(&a.classification.slabs),
    }
}

fn meta_dto(pipeline: &PipelineArgs) -> MetaAnalyze {
    MetaAnalyze {
        pixel_rule: "binary pixel set iff value > 0",
        thinning: if pipeline.no_thin {
            "none"
        } else {
            "guo-hall"
        },
        max_thin_iterations: pipeline.max_thin_iterations,
        connectivity: "C8",
        max_steps: pipeline.max_steps,
    }
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn write_report_csv(path: PathBuf, rows: &[Vec<String>]) -> Result<()> {
    let file = fs::File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    write_report(file, rows).with_context(|| format!("writing {}", path.display()))
}

fn write_report(out: impl io::Write, rows: &[Vec<String>]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(REPORT_HEADER).context("writing csv header")?;
    for row in rows {
        writer.write_record(row).context("writing csv row")?;
    }
    writer.flush().context("flushing csv report")?;
    Ok(())
}

fn sorted_entries(dir: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let path = entry
            .with_context(|| format!("reading entry of {}", dir.display()))?
            .path();
        if keep(&path) {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

fn file_stem_string(path: &Path) -> Result<String> {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .with_context(|| format!("path has no file name: {}", path.display()))
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rf_core::Image;
    use rf_skeleton::{AnalyzeConfig, SkeletonMask, analyze, render_labels};

    use super::{
        END_POINT_COLOR, JUNCTION_COLOR, REPORT_HEADER, SLAB_COLOR, file_stem_string,
        render_overlay, write_report,
    };

    #[test]
    fn report_quotes_free_text_fields() {
        let rows = vec![
            vec!["cell_3".to_string(), "R1".to_string(), "Ctrl".to_string()],
            vec![
                "MAX_R4.czi - C=0, cell 3".to_string(),
                "R1\rR2".to_string(),
                "a\"b".to_string(),
            ],
        ];
        let mut buf = Vec::new();
        write_report(&mut buf, &rows).expect("in-memory report");
        let text = String::from_utf8(buf).expect("utf-8 report");

        assert!(text.starts_with(&REPORT_HEADER.join(",")));
        assert!(text.contains("cell_3,R1,Ctrl"));
        assert!(text.contains("\"MAX_R4.czi - C=0, cell 3\",\"R1\rR2\",\"a\"\"b\""));
    }

    #[test]
    fn cell_id_is_file_stem() {
        let id = file_stem_string(std::path::Path::new("/tmp/x/cell_3_processed.png"))
            .expect("has a stem");
        assert_eq!(id, "cell_3_processed");
    }

    #[test]
    fn overlay_marks_each_class() {
        let mask = SkeletonMask::from_rows(&[
            [false, false, false, false, false, false, false],
            [false, false, false, true, false, false, false],
            [false, false, false, true, false, false, false],
            [false, false, false, true, false, false, false],
            [false, false, true, false, true, false, false],
            [false, true, false, false, false, true, false],
            [false, false, false, false, false, false, false],
        ])
        .expect("valid mask");
        let analysis = analyze(&mask, &AnalyzeConfig::default()).expect("analysis");
        let labels: Image<u8> = render_labels(&mask, &analysis.classification);
        let rgb = render_overlay(&labels, &analysis);

        assert_eq!(rgb.dimensions(), (7, 7));
        assert_eq!(*rgb.get_pixel(3, 3), JUNCTION_COLOR);
        assert_eq!(*rgb.get_pixel(1, 5), END_POINT_COLOR);
        assert_eq!(*rgb.get_pixel(5, 0), image::Rgb([0, 0, 0]));

        let line = SkeletonMask::from_rows(&[[true; 7]]).expect("valid mask");
        let analysis = analyze(&line, &AnalyzeConfig::default()).expect("analysis");
        let rgb = render_overlay(&render_labels(&line, &analysis.classification), &analysis);

        assert_eq!(*rgb.get_pixel(3, 0), SLAB_COLOR);
        assert_eq!(*rgb.get_pixel(0, 0), END_POINT_COLOR);
    }
}
