use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use nalgebra::Vector3;
use rs_arm_kinematics::arm::ArmController;
use rs_arm_kinematics::controls::{ControlState, ReferenceFrame};
use rs_arm_kinematics::kinematic_traits::Joint;
use rs_arm_kinematics::parameters::arm_kinematics::{ArmParameters, ControllerConfig};
use rs_arm_kinematics::utils::{dump_pose, format_joints};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RunMode {
    Direct,
    Ship,
    EndEffector,
}

/// Runs the arm controller with a constant command and prints the arm after every tick.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// YAML file with the `arm` and optional `controller` sections. Reference arm if not given.
    #[arg(long)]
    config: Option<String>,

    #[arg(long, default_value_t = 10)]
    ticks: usize,

    /// Tick duration, seconds
    #[arg(long, default_value_t = 0.1)]
    dt: f64,

    #[arg(long, value_enum, default_value_t = RunMode::Direct)]
    mode: RunMode,

    /// Joint driven in direct mode, 1 (shoulder yaw) to 6 (wrist roll)
    #[arg(long, default_value_t = 1)]
    joint: usize,

    /// Direct mode velocity, degrees per second
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    command: f64,

    /// Pose mode translation per second, as x,y,z (use --translate=-1,0,0 for negative values)
    #[arg(long, default_value = "0,0,0")]
    translate: String,

    /// Pose mode rotation per second, as Euler degrees x,y,z
    #[arg(long, default_value = "0,0,0")]
    rotate: String,

    /// Starting joint angles, degrees, as six comma separated values
    #[arg(long)]
    start: Option<String>,
}

fn parse_values(text: &str, expected: usize, what: &str) -> Result<Vec<f64>> {
    let values = text
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to parse {}: {}", what, text))?;
    if values.len() != expected {
        bail!("{} needs {} values, found {}", what, expected, values.len());
    }
    Ok(values)
}

fn parse_vector(text: &str, what: &str) -> Result<Vector3<f64>> {
    let v = parse_values(text, 3, what)?;
    Ok(Vector3::new(v[0], v[1], v[2]))
}

/// Usage example.
fn main() -> Result<()> {
    let args = Args::parse();

    let (parameters, config) = match &args.config {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read configuration file: {}", path))?;
            let parameters = ArmParameters::from_yaml_str(&contents)
                .with_context(|| format!("Invalid arm in {}", path))?;
            let config = ControllerConfig::from_yaml_str(&contents)
                .with_context(|| format!("Invalid controller section in {}", path))?;
            (parameters, config)
        }
        None => (ArmParameters::default_arm(), ControllerConfig::default()),
    };

    let mut arm = ArmController::with_config(parameters, config).context("Invalid arm configuration")?;
    if let Some(start) = &args.start {
        let v = parse_values(start, 6, "start angles")?;
        arm.actuators_mut().set_angles([v[0], v[1], v[2], v[3], v[4], v[5]]);
    }

    let control = match args.mode {
        RunMode::Direct => {
            let joint = args
                .joint
                .checked_sub(1)
                .and_then(Joint::from_index)
                .with_context(|| format!("Joint must be 1 to 6, got {}", args.joint))?;
            ControlState::direct(joint, args.command)
        }
        RunMode::Ship | RunMode::EndEffector => {
            let frame = match args.mode {
                RunMode::EndEffector => ReferenceFrame::EndEffector,
                _ => ReferenceFrame::Ship,
            };
            ControlState::pose(
                frame,
                parse_vector(&args.translate, "translation")?,
                parse_vector(&args.rotate, "rotation")?,
            )
        }
    };

    println!("{}", control.status_text());
    let start = arm.output();
    println!("tick   0 {}", format_joints(&start.angles));
    dump_pose(&start.pose);

    for tick in 1..=args.ticks {
        let output = arm.tick(args.dt, &control);
        println!("tick {:3} {}", tick, format_joints(&output.angles));
        dump_pose(&output.pose);
    }

    let limited = arm.actuators().limited_joints();
    if !limited.is_empty() {
        let names: Vec<String> = limited.iter().map(|j| j.to_string()).collect();
        println!("At limit: {}", names.join(", "));
    }
    Ok(())
}
