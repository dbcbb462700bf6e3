//! Command-line argument parsing.

use clap::Parser;

use crate::params::{CameraParams, RenderConfig, SurfaceParams};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "bandscape")]
#[command(about = "Noise-displaced, color-banded animated surface", long_about = None)]
pub struct Args {
    /// Window width (logical pixels)
    #[arg(long, value_name = "PIXELS", default_value_t = 1280, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Window height (logical pixels)
    #[arg(long, value_name = "PIXELS", default_value_t = 720, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Vertical field of view (degrees, exclusive 0..180)
    #[arg(long, value_name = "DEGREES", default_value_t = 75.0, value_parser = parse_fov)]
    pub fov: f32,

    /// Plane subdivision factor (segments = floor(size * divisions)), in (0, 10]
    #[arg(long, value_name = "FACTOR", default_value_t = 0.95, value_parser = parse_divisions)]
    pub divisions: f32,

    /// Initial camera position
    #[arg(
        long,
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        default_values_t = [0.0, 5.0, 1.0],
        allow_negative_numbers = true
    )]
    pub camera: Vec<f32>,

    /// Print the generated WGSL program and exit
    #[arg(long)]
    pub print_shader: bool,
}

/// Upper bound for `--divisions` (1000 segments per axis on the default plane)
const MAX_DIVISIONS: f32 = 10.0;

fn parse_f32(s: &str) -> Result<f32, String> {
    s.parse::<f32>()
        .map_err(|e| format!("'{}' is not a number: {}", s, e))
}

fn parse_fov(s: &str) -> Result<f32, String> {
    let fov = parse_f32(s)?;
    if fov > 0.0 && fov < 180.0 {
        Ok(fov)
    } else {
        Err(format!("{} is not in (0, 180) degrees", fov))
    }
}

fn parse_divisions(s: &str) -> Result<f32, String> {
    let divisions = parse_f32(s)?;
    if divisions > 0.0 && divisions <= MAX_DIVISIONS {
        Ok(divisions)
    } else {
        Err(format!("{} is not in (0, {}]", divisions, MAX_DIVISIONS))
    }
}

impl Args {
    /// Window configuration from the size flags
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            window_width: self.width,
            window_height: self.height,
            ..Default::default()
        }
    }

    /// Camera parameters from `--fov` and `--camera`
    pub fn camera_params(&self) -> CameraParams {
        let mut params = CameraParams {
            fov_degrees: self.fov,
            ..Default::default()
        };
        if let [x, y, z] = self.camera[..] {
            params.position = [x, y, z];
        }
        params
    }

    /// Plane parameters from `--divisions`
    pub fn surface_params(&self) -> SurfaceParams {
        SurfaceParams {
            divisions: self.divisions,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["bandscape"]).unwrap();
        assert_eq!(args.width, 1280);
        assert_eq!(args.height, 720);
        assert_eq!(args.fov, 75.0);
        assert_eq!(args.divisions, 0.95);
        assert_eq!(args.camera, vec![0.0, 5.0, 1.0]);
        assert!(!args.print_shader);

        let camera = args.camera_params();
        assert_eq!(camera.position, CameraParams::default().position);
        assert_eq!(args.surface_params().segments(), (95, 95));
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "bandscape",
            "--width",
            "800",
            "--height",
            "600",
            "--fov",
            "60",
            "--divisions",
            "0.5",
            "--camera",
            "-2",
            "3.5",
            "4",
        ])
        .unwrap();

        let render = args.render_config();
        assert_eq!((render.window_width, render.window_height), (800, 600));
        assert_eq!(render.max_pixel_ratio, 2.0);

        let camera = args.camera_params();
        assert_eq!(camera.fov_degrees, 60.0);
        assert_eq!(camera.position, [-2.0, 3.5, 4.0]);
        assert_eq!(camera.near_plane, 0.1);

        assert_eq!(args.surface_params().segments(), (50, 50));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(Args::try_parse_from(["bandscape", "--width", "0"]).is_err());
        assert!(Args::try_parse_from(["bandscape", "--camera", "1", "2"]).is_err());
        assert!(Args::try_parse_from(["bandscape", "--fov", "wide"]).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_fov() {
        for fov in ["0", "-10", "180", "240", "inf", "NaN"] {
            assert!(
                Args::try_parse_from(["bandscape", "--fov", fov]).is_err(),
                "--fov {} accepted",
                fov
            );
        }
        let args = Args::try_parse_from(["bandscape", "--fov", "179.5"]).unwrap();
        assert_eq!(args.camera_params().fov_degrees, 179.5);
    }

    #[test]
    fn test_rejects_out_of_range_divisions() {
        for divisions in ["0", "-1", "700", "inf", "NaN"] {
            assert!(
                Args::try_parse_from(["bandscape", "--divisions", divisions]).is_err(),
                "--divisions {} accepted",
                divisions
            );
        }

        // Largest accepted value still builds a mesh
        let args = Args::try_parse_from(["bandscape", "--divisions", "10"]).unwrap();
        let mesh = crate::surface::SurfaceMesh::new(&args.surface_params());
        assert_eq!(mesh.segments(), (1000, 1000));
        assert_eq!(mesh.vertices.len(), 1001 * 1001);
    }

    #[test]
    fn test_print_shader_flag() {
        let args = Args::try_parse_from(["bandscape", "--print-shader"]).unwrap();
        assert!(args.print_shader);
    }
}
