use std::{collections::VecDeque, time::Duration};

use gobbler::{
    config::{GobblerConfig, SwitchPolarity},
    drivetrain::GearState,
    intake::ArmState,
    io::{ActuatorCommands, Buttons, CycleInputs, LimitSwitches},
    ports::{InputPort, OutputPort},
    robot::{Period, Robot},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Replays queued snapshots; repeats the last one when the queue runs dry.
#[derive(Default)]
struct ScriptedInputs {
    queue: VecDeque<CycleInputs>,
    last:  CycleInputs,
    reads: usize,
}

impl ScriptedInputs {
    fn push(&mut self, inputs: CycleInputs) { self.queue.push_back(inputs); }
}

impl InputPort for ScriptedInputs {
    fn sample(&mut self) -> CycleInputs {
        self.reads += 1;
        if let Some(next) = self.queue.pop_front() {
            self.last = next;
        }
        self.last
    }
}

#[derive(Default)]
struct RecordingOutputs {
    emitted: Vec<ActuatorCommands>,
}

impl OutputPort for RecordingOutputs {
    fn emit(&mut self, commands: &ActuatorCommands) { self.emitted.push(*commands); }
}

fn config() -> GobblerConfig {
    GobblerConfig::default().with_shooter_switch(SwitchPolarity::ActiveLow)
}

fn robot() -> Robot<ScriptedInputs, RecordingOutputs> {
    Robot::new(config(), ScriptedInputs::default(), RecordingOutputs::default())
        .expect("valid config")
}

fn at(ms: u64) -> CycleInputs {
    CycleInputs {
        now: Duration::from_millis(ms),
        ..CycleInputs::default()
    }
}

#[test]
fn unset_polarity_fails_construction() {
    let result = Robot::new(
        GobblerConfig::default(),
        ScriptedInputs::default(),
        RecordingOutputs::default(),
    );
    assert!(result.is_err());
}

#[test]
fn lifecycle_emits_once_per_call() {
    let mut robot = robot();
    robot.robot_init();
    robot.disabled_periodic();
    robot.autonomous_init();
    robot.autonomous_periodic();
    robot.teleop_init();
    robot.teleop_periodic();

    // Robot init only emits, autonomous init only samples.
    assert_eq!(robot.outputs().emitted.len(), 5);
    assert_eq!(robot.inputs_mut().reads, 5);
    assert_eq!(robot.period(), Period::Teleop);
}

#[test]
fn robot_init_is_low_gear_and_idle() {
    let mut robot = robot();
    robot.robot_init();
    assert_eq!(
        robot.outputs().emitted,
        vec![ActuatorCommands::idle(GearState::Low, false)]
    );
}

#[test]
fn autonomous_drives_for_fixed_time() {
    let mut robot = robot();
    robot.inputs_mut().push(at(1_000));
    robot.autonomous_init();

    robot.inputs_mut().push(at(1_020));
    robot.autonomous_periodic();
    robot.inputs_mut().push(at(2_999));
    robot.autonomous_periodic();
    robot.inputs_mut().push(at(3_000));
    robot.autonomous_periodic();

    let emitted = &robot.outputs().emitted;
    assert_eq!((emitted[0].drive_left, emitted[0].drive_right), (0.5, 0.5));
    assert_eq!(emitted[1].drive_left, 0.5);
    assert_eq!((emitted[2].drive_left, emitted[2].drive_right), (0.0, 0.0));
    for commands in emitted {
        assert_eq!((commands.roller, commands.arm, commands.shooter), (0.0, 0.0, 0.0));
        assert!(commands.compressor);
    }
}

#[test]
fn autonomous_periodic_without_init_still_drives() {
    let mut robot = robot();
    robot.disabled_periodic();
    robot.inputs_mut().push(at(500));
    robot.autonomous_periodic();

    assert_eq!(robot.period(), Period::Autonomous);
    let last = robot.outputs().emitted[1];
    assert_eq!((last.drive_left, last.drive_right), (0.5, 0.5));
    assert!(last.compressor);
}

#[test]
fn teleop_init_zeroes_everything() {
    let mut robot = robot();
    robot.teleop_init();
    assert_eq!(
        robot.outputs().emitted,
        vec![ActuatorCommands::idle(GearState::Low, true)]
    );
    assert_eq!(robot.teleop().map(|t| t.arm_state()), Some(ArmState::Home));
}

#[test]
fn gear_survives_a_new_teleop_period() {
    let mut robot = robot();
    robot.teleop_init();
    robot.inputs_mut().push(CycleInputs {
        buttons: Buttons {
            gear_high: true,
            ..Buttons::default()
        },
        ..at(20)
    });
    assert_eq!(robot.teleop_periodic().commands.gear, GearState::High);

    robot.inputs_mut().push(at(40));
    robot.teleop_init();
    assert_eq!(robot.teleop_periodic().commands.gear, GearState::High);
}

#[test]
fn periodic_without_init_still_runs() {
    let mut robot = robot();
    robot.inputs_mut().push(CycleInputs {
        buttons: Buttons {
            extend: true,
            ..Buttons::default()
        },
        ..at(0)
    });
    let report = robot.teleop_periodic();
    assert_eq!(report.commands.arm, -1.0);
    assert_eq!(robot.outputs().emitted.len(), 1);
}

fn random_inputs(rng: &mut StdRng, ms: u64) -> CycleInputs {
    CycleInputs {
        left_axis:  rng.gen_range(-1.5..1.5),
        right_axis: rng.gen_range(-1.5..1.5),
        buttons:    Buttons {
            extend:            rng.gen_bool(0.3),
            retract:           rng.gen_bool(0.3),
            fire:              rng.gen_bool(0.1),
            pass:              rng.gen_bool(0.2),
            intake:            rng.gen_bool(0.2),
            gear_high:         rng.gen_bool(0.2),
            gear_low:          rng.gen_bool(0.2),
            compressor_toggle: rng.gen_bool(0.05),
            manual_toggle:     rng.gen_bool(0.05),
        },
        switches:   LimitSwitches {
            arm_extended_level:  rng.gen_bool(0.7),
            arm_retracted_level: rng.gen_bool(0.7),
            shooter_level:       rng.gen_bool(0.5),
        },
        now:        Duration::from_millis(ms),
    }
}

#[test]
fn every_cycle_emits_under_random_input() {
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut robot = robot();
        robot.robot_init();
        robot.teleop_init();

        let cycles = 2_000;
        for i in 0..cycles {
            // Occasionally jump the clock ahead; it runs backwards on the next cycle.
            let ms = if rng.gen_bool(0.02) { 20 * i + 5_000 } else { 20 * i };
            robot.inputs_mut().push(random_inputs(&mut rng, ms));
            robot.teleop_periodic();
        }

        let emitted = &robot.outputs().emitted;
        assert_eq!(emitted.len(), 2 + cycles as usize, "seed {seed}");
        assert_eq!(robot.teleop().map(|t| t.cycles()), Some(cycles));

        for commands in emitted {
            for speed in commands.speeds() {
                assert!(speed.is_finite(), "seed {seed}: {commands:?}");
                assert!((-1.0..=1.0).contains(&speed), "seed {seed}: {commands:?}");
            }
            let (high, low) = commands.shifter_levels();
            assert!(high != low, "seed {seed}: {commands:?}");
        }
    }
}
