//! Supports extracting arm and controller parameters from YAML file (optional)

use std::path::Path;
use nalgebra::{Unit, Vector3};
use yaml_rust2::{Yaml, YamlLoader};

use crate::constraints::Constraints;
use crate::kinematic_traits::Joint;
use crate::parameter_error::ParameterError;
use crate::parameters::arm_kinematics::{ArmParameters, ControllerConfig, InputSpeeds, JointParameters};

impl ArmParameters {
    /// Read the arm configuration from YAML file. YAML file like this is supported:
    /// ```yaml
    /// arm:
    ///   joints:
    ///     - name: shoulder_yaw
    ///       axis: [0, 1, 0]
    ///       offset: [0, 0, 0]
    ///       limits: [-90, 90]
    ///       max_velocity: 10
    ///     # ... six joints in chain order
    ///   end_effector: [0, 0, 0.546]
    /// ```
    /// Names are optional but, if given, must match the joint at that position.
    /// Axes are normalized. Angles and velocities are in degrees.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ParameterError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ParameterError> {
        let doc = load_document(contents)?;
        let arm = &doc["arm"];
        if arm.is_badvalue() {
            return Err(ParameterError::MissingField("arm".to_string()));
        }

        let joints_yaml = arm["joints"]
            .as_vec()
            .ok_or_else(|| ParameterError::MissingField("arm.joints".to_string()))?;
        if joints_yaml.len() != 6 {
            return Err(ParameterError::InvalidLength { expected: 6, found: joints_yaml.len() });
        }

        let mut joints = Vec::with_capacity(6);
        for (joint, yaml) in Joint::ALL.iter().zip(joints_yaml.iter()) {
            joints.push(read_joint(*joint, yaml)?);
        }
        let joints: [JointParameters; 6] = joints
            .try_into()
            .map_err(|_| ParameterError::InvalidLength { expected: 6, found: joints_yaml.len() })?;

        let end_effector = read_vector(&arm["end_effector"], "arm.end_effector")?;

        let parameters = ArmParameters { joints, end_effector };
        parameters.validate()?;
        Ok(parameters)
    }
}

impl ControllerConfig {
    /// Reads the optional `controller` section. Missing keys keep their defaults:
    /// ```yaml
    /// controller:
    ///   jacobian_step: 1.0
    ///   singular_tolerance: 1e-9
    /// ```
    pub fn from_yaml_str(contents: &str) -> Result<Self, ParameterError> {
        let doc = load_document(contents)?;
        let section = &doc["controller"];
        let mut config = ControllerConfig::default();
        if let Some(step) = optional_number(&section["jacobian_step"], "controller.jacobian_step")? {
            config.jacobian_step = step;
        }
        if let Some(tolerance) = optional_number(&section["singular_tolerance"], "controller.singular_tolerance")? {
            config.singular_tolerance = tolerance;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ParameterError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }
}

impl InputSpeeds {
    /// Reads the optional `input` section (`direct`, `translate`, `rotate`).
    pub fn from_yaml_str(contents: &str) -> Result<Self, ParameterError> {
        let doc = load_document(contents)?;
        let section = &doc["input"];
        let mut speeds = InputSpeeds::default();
        if let Some(v) = optional_number(&section["direct"], "input.direct")? {
            speeds.direct = v;
        }
        if let Some(v) = optional_number(&section["translate"], "input.translate")? {
            speeds.translate = v;
        }
        if let Some(v) = optional_number(&section["rotate"], "input.rotate")? {
            speeds.rotate = v;
        }
        Ok(speeds)
    }
}

/// Parses the first YAML document. An empty input is an empty document.
fn load_document(contents: &str) -> Result<Yaml, ParameterError> {
    let mut docs = YamlLoader::load_from_str(contents)
        .map_err(|e| ParameterError::ParseError(format!("{}", e)))?;
    if docs.is_empty() {
        return Ok(Yaml::Null);
    }
    Ok(docs.swap_remove(0))
}

fn read_joint(joint: Joint, yaml: &Yaml) -> Result<JointParameters, ParameterError> {
    let field = |key: &str| format!("arm.joints.{}.{}", joint.name(), key);

    if let Some(name) = yaml["name"].as_str() {
        if Joint::from_name(name) != Some(joint) {
            return Err(ParameterError::InvalidValue {
                field: field("name"),
                reason: format!("expected {}, found {}", joint.name(), name),
            });
        }
    }

    let axis = read_vector(&yaml["axis"], &field("axis"))?;
    if !(axis.norm() > 0.0) {
        return Err(ParameterError::InvalidValue {
            field: field("axis"),
            reason: "axis must not be zero".to_string(),
        });
    }

    let offset = read_vector(&yaml["offset"], &field("offset"))?;

    let limits = read_numbers(&yaml["limits"], &field("limits"))?;
    if limits.len() != 2 {
        return Err(ParameterError::InvalidLength { expected: 2, found: limits.len() });
    }
    if limits[0] > limits[1] {
        return Err(ParameterError::InvalidValue {
            field: field("limits"),
            reason: format!("lower limit {} is above upper limit {}", limits[0], limits[1]),
        });
    }

    let max_velocity = number(&yaml["max_velocity"], &field("max_velocity"))?;

    Ok(JointParameters {
        axis: Unit::new_normalize(axis),
        offset,
        limits: Constraints::new(limits[0], limits[1]),
        max_velocity,
    })
}

fn number(yaml: &Yaml, field: &str) -> Result<f64, ParameterError> {
    optional_number(yaml, field)?.ok_or_else(|| ParameterError::MissingField(field.to_string()))
}

/// Reads a number that may be written as an integer. Absent values give `None`.
fn optional_number(yaml: &Yaml, field: &str) -> Result<Option<f64>, ParameterError> {
    match yaml {
        Yaml::BadValue | Yaml::Null => Ok(None),
        Yaml::Integer(i) => Ok(Some(*i as f64)),
        Yaml::Real(_) => yaml
            .as_f64()
            .map(Some)
            .ok_or_else(|| ParameterError::ParseError(format!("{} is not a number", field))),
        _ => Err(ParameterError::ParseError(format!("{} must be a number", field))),
    }
}

fn read_numbers(yaml: &Yaml, field: &str) -> Result<Vec<f64>, ParameterError> {
    let items = yaml
        .as_vec()
        .ok_or_else(|| ParameterError::MissingField(field.to_string()))?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| number(item, &format!("{}[{}]", field, i)))
        .collect()
}

fn read_vector(yaml: &Yaml, field: &str) -> Result<Vector3<f64>, ParameterError> {
    let values = read_numbers(yaml, field)?;
    if values.len() != 3 {
        return Err(ParameterError::InvalidLength { expected: 3, found: values.len() });
    }
    Ok(Vector3::new(values[0], values[1], values[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_arm_round_trips_through_yaml() {
        let original = ArmParameters::default_arm();
        let yaml = original.to_yaml();
        let parsed = ArmParameters::from_yaml_str(&yaml).expect("generated YAML must parse");

        for (a, b) in original.joints.iter().zip(parsed.joints.iter()) {
            assert!((a.axis.into_inner() - b.axis.into_inner()).norm() < 1e-12);
            assert!((a.offset - b.offset).norm() < 1e-12);
            assert_eq!(a.limits, b.limits);
            assert_eq!(a.max_velocity, b.max_velocity);
        }
        assert!((original.end_effector - parsed.end_effector).norm() < 1e-12);
    }

    #[test]
    fn test_wrong_joint_count() {
        let yaml = "arm:\n  joints:\n    - axis: [0, 1, 0]\n      offset: [0, 0, 0]\n      limits: [-90, 90]\n      max_velocity: 10\n  end_effector: [0, 0, 1]\n";
        match ArmParameters::from_yaml_str(yaml) {
            Err(ParameterError::InvalidLength { expected: 6, found: 1 }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_arm() {
        assert!(matches!(
            ArmParameters::from_yaml_str("controller:\n  jacobian_step: 0.5\n"),
            Err(ParameterError::MissingField(_))
        ));
    }

    #[test]
    fn test_misnamed_joint_rejected() {
        let yaml = ArmParameters::default_arm().to_yaml().replacen("name: elbow_pitch", "name: wrist_roll", 1);
        assert!(matches!(
            ArmParameters::from_yaml_str(&yaml),
            Err(ParameterError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_axis_is_normalized_and_zero_rejected() {
        let yaml = ArmParameters::default_arm().to_yaml().replacen("axis: [0, 1, 0]", "axis: [0, 2, 0]", 1);
        let parsed = ArmParameters::from_yaml_str(&yaml).unwrap();
        assert!((parsed.joints[0].axis.into_inner() - Vector3::y()).norm() < 1e-12);

        let yaml = ArmParameters::default_arm().to_yaml().replacen("axis: [0, 1, 0]", "axis: [0, 0, 0]", 1);
        assert!(ArmParameters::from_yaml_str(&yaml).is_err());
    }

    #[test]
    fn test_controller_defaults_and_overrides() {
        assert_eq!(ControllerConfig::from_yaml_str("").unwrap(), ControllerConfig::default());

        let config = ControllerConfig::from_yaml_str("controller:\n  jacobian_step: 0.01\n").unwrap();
        assert_eq!(config.jacobian_step, 0.01);
        assert_eq!(config.singular_tolerance, ControllerConfig::default().singular_tolerance);

        assert!(ControllerConfig::from_yaml_str("controller:\n  jacobian_step: 0\n").is_err());
        assert!(ControllerConfig::from_yaml_str("controller:\n  jacobian_step: fast\n").is_err());
    }

    #[test]
    fn test_input_speeds() {
        let speeds = InputSpeeds::from_yaml_str("input:\n  direct: 15\n").unwrap();
        assert_eq!(speeds.direct, 15.0);
        assert_eq!(speeds.rotate, InputSpeeds::default().rotate);
    }
}
