//! # Dossier CLI
//!
//! Terminal front end: collects building parameters, runs the plan builder,
//! the volume builder and the structural estimator in sequence, and prints a
//! summary plus the JSON results.
//!
//! Usage:
//!   dossier_cli [options]
//!
//! Options:
//!   --params <file>     Read building parameters from a JSON file
//!   --area <m2>         Derive the footprint from a floor area
//!   --settings <file>   Settings JSON (also read from DOSSIER_SETTINGS)
//!   --dxf <plan|model>  Print DXF text for the plan or the model instead
//!
//! Without `--params` or `--area`, parameters are prompted for interactively.
//! Logs go to stderr; set RUST_LOG to change the level.

use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use dossier_core::dxf::{model_to_dxf, plan_to_dxf};
use dossier_core::plan::{generate_rectangular_plan, PlanDocument};
use dossier_core::settings::{load_settings, DossierSettings};
use dossier_core::structural::{estimate, StructuralReport};
use dossier_core::volume::{ModelDocument, VolumeBuilder};
use dossier_core::{BuildingParameters, DossierError, DossierResult};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq)]
enum DxfTarget {
    Plan,
    Model,
}

#[derive(Debug, Default)]
struct Options {
    params_path: Option<PathBuf>,
    area: Option<f64>,
    settings_path: Option<PathBuf>,
    dxf: Option<DxfTarget>,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match (args[i].as_str(), value) {
            ("--help" | "-h", _) => return Err(String::new()),
            ("--params", Some(v)) => options.params_path = Some(PathBuf::from(v)),
            ("--settings", Some(v)) => options.settings_path = Some(PathBuf::from(v)),
            ("--area", Some(v)) => {
                options.area = Some(v.parse().map_err(|_| format!("Invalid area: {}", v))?);
            }
            ("--dxf", Some(v)) => {
                options.dxf = Some(match v.as_str() {
                    "plan" => DxfTarget::Plan,
                    "model" => DxfTarget::Model,
                    other => return Err(format!("Unknown DXF target: {}", other)),
                });
            }
            (flag, None) if flag.starts_with("--") => return Err(format!("Missing value for {}", flag)),
            (other, _) => return Err(format!("Unknown option: {}", other)),
        }
        i += 2;
    }

    if options.settings_path.is_none() {
        options.settings_path = env::var("DOSSIER_SETTINGS").ok().map(PathBuf::from);
    }

    Ok(options)
}

fn print_usage() {
    println!("Usage: dossier_cli [--params <file>] [--area <m2>] [--settings <file>] [--dxf <plan|model>]");
}

/// Print a prompt and read one line; `None` on end of input or I/O failure.
fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input),
    }
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    prompt_line(prompt)
        .and_then(|input| input.trim().parse().ok())
        .unwrap_or(default)
}

/// Parse a storey count. Blank input keeps the default; fractional,
/// negative or zero counts are refused rather than truncated.
fn parse_floors(input: &str, default: u32) -> Result<u32, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(default);
    }
    match input.parse::<u32>() {
        Ok(0) => Err("At least one floor is required".to_string()),
        Ok(floors) => Ok(floors),
        Err(_) => Err(format!("'{}' is not a whole number of floors", input)),
    }
}

/// Ask until the answer is a valid storey count.
fn prompt_u32(prompt: &str, default: u32) -> u32 {
    loop {
        let Some(input) = prompt_line(prompt) else {
            return default;
        };
        match parse_floors(&input, default) {
            Ok(floors) => return floors,
            Err(message) => eprintln!("{}", message),
        }
    }
}

fn prompt_params() -> BuildingParameters {
    let defaults = BuildingParameters::default();
    let length = prompt_f64(&format!("Length (m) [{}]: ", defaults.length), defaults.length);
    let width = prompt_f64(&format!("Width (m) [{}]: ", defaults.width), defaults.width);
    let floors = prompt_u32(&format!("Floors [{}]: ", defaults.floors), defaults.floors);
    let wall_thickness = prompt_f64(
        &format!("Wall thickness (m) [{}]: ", defaults.wall_thickness),
        defaults.wall_thickness,
    );
    let span = prompt_f64(&format!("Typical span (m) [{}]: ", defaults.span), defaults.span);

    BuildingParameters {
        length,
        width,
        floors,
        wall_thickness,
        surface: length * width,
        span,
        ..defaults
    }
}

fn read_params(path: &Path) -> DossierResult<BuildingParameters> {
    let contents = fs::read_to_string(path)
        .map_err(|e| DossierError::file_error("read", path.display().to_string(), e.to_string()))?;
    serde_json::from_str(&contents).map_err(|e| DossierError::SerializationError {
        reason: format!("Invalid parameters JSON in {}: {}", path.display(), e),
    })
}

/// Everything one invocation produces.
struct Dossier {
    params: BuildingParameters,
    plan: PlanDocument,
    model: ModelDocument,
    report: StructuralReport,
}

fn generate(options: &Options) -> DossierResult<Dossier> {
    let settings = match &options.settings_path {
        Some(path) => load_settings(path)?,
        None => DossierSettings::default(),
    };

    let params = match (&options.params_path, options.area) {
        (Some(path), _) => read_params(path)?,
        (None, Some(area)) => BuildingParameters::from_floor_area(area),
        (None, None) => prompt_params(),
    };
    debug!(?params, "building parameters");

    let plan = generate_rectangular_plan(params.length, params.width, params.wall_thickness)?;
    let model = VolumeBuilder::from_settings(&settings.massing).generate_building(&params)?;
    let report = estimate(&params.structural_input(), &settings.estimator)?;
    info!(
        walls = plan.walls.len(),
        faces = model.faces.len(),
        total_load = report.loads.total_load_building,
        "dossier generated"
    );

    Ok(Dossier {
        params,
        plan,
        model,
        report,
    })
}

fn render_dxf(dossier: &Dossier, target: DxfTarget) -> String {
    match target {
        DxfTarget::Plan => plan_to_dxf(&dossier.plan),
        DxfTarget::Model => model_to_dxf(&dossier.model),
    }
}

fn run(options: &Options) -> DossierResult<()> {
    let dossier = generate(options)?;

    if let Some(target) = options.dxf {
        print!("{}", render_dxf(&dossier, target));
        return Ok(());
    }

    let Dossier {
        params,
        plan,
        model,
        report,
    } = dossier;

    println!();
    println!("═══════════════════════════════════════");
    println!("  BUILDING DOSSIER");
    println!("═══════════════════════════════════════");
    println!();
    println!("Footprint:");
    println!("  {:.2} m x {:.2} m, walls {:.0} cm", params.length, params.width, params.wall_thickness * 100.0);
    println!("  {} floor(s), total height {:.2} m", params.floors, model.total_height);
    println!("  {} wall outlines, {} dimensions", plan.walls.len(), plan.dimensions.len());
    println!();
    println!("Loads:");
    println!("  G = {:.1} kN/m², Q = {:.1} kN/m²", report.loads.dead_load, report.loads.live_load);
    println!("  Per floor: {:.0} kN", report.loads.total_load_per_floor);
    println!("  Building:  {:.0} kN", report.loads.total_load_building);
    println!();
    println!("Sizing:");
    println!("  {}", report.slab.recommendation_text);
    println!(
        "  Beam {:.2} m x {:.2} m over {:.1} m",
        report.beam.height, report.beam.width, report.beam.span
    );
    println!(
        "  Footing {:.2} m² ({:.2} m side), depth {:.2} m",
        report.foundation.area, report.foundation.side, report.foundation.depth
    );
    println!();
    println!("  {}", report.compliance.disclaimer);
    println!("═══════════════════════════════════════");

    println!();
    println!("JSON Output:");
    let output = serde_json::json!({
        "parameters": params,
        "plan": plan,
        "model": model,
        "structural": report,
    });
    let json = serde_json::to_string_pretty(&output).map_err(|e| DossierError::SerializationError {
        reason: e.to_string(),
    })?;
    println!("{}", json);

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            if !message.is_empty() {
                eprintln!("{}", message);
            }
            print_usage();
            std::process::exit(if message.is_empty() { 0 } else { 1 });
        }
    };

    if let Err(e) = run(&options) {
        eprintln!("Error: {}", e);
        if let Ok(json) = serde_json::to_string_pretty(&e) {
            eprintln!();
            eprintln!("Error JSON:");
            eprintln!("{}", json);
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("dossier_cli").chain(list.iter().copied()).map(String::from).collect()
    }

    #[test]
    fn test_parse_args() {
        let options = parse_args(&args(&["--area", "120", "--dxf", "model"])).unwrap();
        assert_eq!(options.area, Some(120.0));
        assert_eq!(options.dxf, Some(DxfTarget::Model));
        assert!(options.params_path.is_none());
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&args(&["--dxf", "svg"])).is_err());
        assert!(parse_args(&args(&["--area"])).is_err());
        assert!(parse_args(&args(&["--area", "lots"])).is_err());
        assert!(parse_args(&args(&["--bogus", "1"])).is_err());
        assert_eq!(parse_args(&args(&["--help"])).unwrap_err(), "");
    }

    #[test]
    fn test_parse_floors() {
        assert_eq!(parse_floors("3\n", 1), Ok(3));
        assert_eq!(parse_floors("  \n", 2), Ok(2));
        assert!(parse_floors("2.5", 1).is_err());
        assert!(parse_floors("-1", 1).is_err());
        assert!(parse_floors("0", 1).is_err());
        assert!(parse_floors("two", 1).is_err());
    }

    /// Write a parameters file unique to this process and test.
    fn temp_params(name: &str, json: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("dossier_cli_{}_{}.json", name, std::process::id()));
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_run_from_params_file() {
        let path = temp_params(
            "run",
            r#"{ "length": 12.0, "width": 10.0, "floors": 2, "surface": 120.0, "span": 6.0 }"#,
        );
        let options = Options {
            params_path: Some(path.clone()),
            ..Default::default()
        };

        let dossier = generate(&options).unwrap();
        assert_eq!(dossier.params.floors, 2);
        assert_eq!(dossier.plan.walls.len(), 4);
        assert_eq!(dossier.model.total_height, 6.0);
        assert_eq!(dossier.report.loads.total_load_building, 960.0);
        assert!(run(&options).is_ok());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_run_rejects_invalid_params_file() {
        let path = temp_params("invalid", r#"{ "floors": 0 }"#);
        let options = Options {
            params_path: Some(path.clone()),
            ..Default::default()
        };

        let err = run(&options).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PARAMETER");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_generate_from_area_and_dxf() {
        let options = Options {
            area: Some(120.0),
            dxf: Some(DxfTarget::Plan),
            ..Default::default()
        };
        let dossier = generate(&options).unwrap();
        assert_eq!(dossier.params.length, 12.0);
        assert_eq!(dossier.params.width, 10.0);

        let plan = render_dxf(&dossier, DxfTarget::Plan);
        assert!(plan.contains("AC1015"));
        assert_eq!(plan.matches("\nLWPOLYLINE\n").count(), 4);
        assert_eq!(plan.matches("\nDIMENSION\n").count(), 2);

        let model = render_dxf(&dossier, DxfTarget::Model);
        assert_eq!(model.matches("\n3DFACE\n").count(), 4);
        assert!(run(&options).is_ok());
    }

    #[test]
    fn test_read_params_missing_file() {
        let err = read_params(Path::new("/nonexistent/params.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
