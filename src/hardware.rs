//! V5 device bindings for the control core.
//!
//! Two gamepads drive the robot, one for the driver and one for the operator:
//!
//! | Controller | Input | Action |
//! | ---------- | ----- | ------ |
//! | Primary | left/right stick Y | tank drive |
//! | Primary | R1 / L1 | high / low gear |
//! | Partner | R2 / L2 | extend / retract arm |
//! | Partner | Y | fire |
//! | Partner | B | pass (manual mode) |
//! | Partner | A | intake (manual mode) |
//! | Partner | X | compressor toggle |
//! | Partner | Down | manual override toggle |
//!
//! Device errors are logged and otherwise ignored. A failed read falls back to
//! a released switch or an idle gamepad, and a failed write is retried on the
//! next cycle anyway.
//!
//! # Example
//!
//! ```ignore
//! use gobbler::{config::{GobblerConfig, SwitchPolarity}, fs::logger, hardware::VexRobot};
//! use log::LevelFilter;
//! use vexide::prelude::*;
//!
//! #[vexide::main]
//! async fn main(peripherals: Peripherals) {
//!     logger::init(LevelFilter::Info).expect("Logger init failed");
//!     let config = GobblerConfig::default().with_shooter_switch(SwitchPolarity::ActiveLow);
//!     let robot = VexRobot::new(peripherals, config).expect("invalid config");
//!     robot.compete().await;
//! }
//! ```

use log::warn;
use vexide::{
    controller::{ButtonState, ControllerState},
    prelude::*,
    time::user_uptime,
};

use crate::{
    config::GobblerConfig,
    error::ConfigError,
    io::{ActuatorCommands, Buttons, CycleInputs, LimitSwitches},
    ports::{InputPort, OutputPort},
    robot::Robot,
};

/// Motor voltage for a speed command of 1.0.
const MAX_VOLTAGE: f64 = 12.0;

/// A list of Controller Buttons.
#[derive(Debug, Clone, Copy)]
pub enum ControllerButton {
    ButtonA,
    ButtonB,
    ButtonX,
    ButtonY,
    ButtonUp,
    ButtonDown,
    ButtonLeft,
    ButtonRight,
    ButtonL1,
    ButtonL2,
    ButtonR1,
    ButtonR2,
}

/// Which gamepad button feeds each operator input.
#[derive(Debug, Clone, Copy)]
pub struct ButtonMap {
    /// Primary controller.
    pub gear_high:         ControllerButton,
    /// Primary controller.
    pub gear_low:          ControllerButton,
    pub extend:            ControllerButton,
    pub retract:           ControllerButton,
    pub fire:              ControllerButton,
    pub pass:              ControllerButton,
    pub intake:            ControllerButton,
    pub compressor_toggle: ControllerButton,
    pub manual_toggle:     ControllerButton,
}

impl Default for ButtonMap {
    fn default() -> Self {
        Self {
            gear_high:         ControllerButton::ButtonR1,
            gear_low:          ControllerButton::ButtonL1,
            extend:            ControllerButton::ButtonR2,
            retract:           ControllerButton::ButtonL2,
            fire:              ControllerButton::ButtonY,
            pass:              ControllerButton::ButtonB,
            intake:            ControllerButton::ButtonA,
            compressor_toggle: ControllerButton::ButtonX,
            manual_toggle:     ControllerButton::ButtonDown,
        }
    }
}

/// Gamepads and limit switches.
pub struct VexInputs {
    pub driver:         Controller,
    pub partner:        Controller,
    pub buttons:        ButtonMap,
    pub arm_extended:   AdiDigitalIn,
    pub arm_retracted:  AdiDigitalIn,
    pub shooter_switch: AdiDigitalIn,
}

impl InputPort for VexInputs {
    fn sample(&mut self) -> CycleInputs {
        let driver = get_state(&self.driver);
        let partner = get_state(&self.partner);
        let map = self.buttons;
        let pressed = |state: ControllerState, button| get_button_state(state, button).is_pressed();

        CycleInputs {
            left_axis:  driver.left_stick.y(),
            right_axis: driver.right_stick.y(),
            buttons:    Buttons {
                extend:            pressed(partner, map.extend),
                retract:           pressed(partner, map.retract),
                fire:              pressed(partner, map.fire),
                pass:              pressed(partner, map.pass),
                intake:            pressed(partner, map.intake),
                gear_high:         pressed(driver, map.gear_high),
                gear_low:          pressed(driver, map.gear_low),
                compressor_toggle: pressed(partner, map.compressor_toggle),
                manual_toggle:     pressed(partner, map.manual_toggle),
            },
            switches:   LimitSwitches {
                arm_extended_level:  read_level(&self.arm_extended),
                arm_retracted_level: read_level(&self.arm_retracted),
                shooter_level:       read_level(&self.shooter_switch),
            },
            now:        user_uptime(),
        }
    }
}

/// Motors and solenoids.
pub struct VexOutputs {
    pub left:         [Motor; 2],
    pub right:        [Motor; 2],
    pub roller:       Motor,
    pub arm:          Motor,
    pub shooter:      Motor,
    pub shifter_high: AdiDigitalOut,
    pub shifter_low:  AdiDigitalOut,
    /// Relay feeding the compressor.
    pub compressor:   AdiDigitalOut,
}

impl OutputPort for VexOutputs {
    fn emit(&mut self, commands: &ActuatorCommands) {
        set_speed(&mut self.left, commands.drive_left);
        set_speed(&mut self.right, commands.drive_right);
        set_speed(std::slice::from_mut(&mut self.roller), commands.roller);
        set_speed(std::slice::from_mut(&mut self.arm), commands.arm);
        set_speed(std::slice::from_mut(&mut self.shooter), commands.shooter);

        let (high, low) = commands.shifter_levels();
        set_level(&mut self.shifter_high, high);
        set_level(&mut self.shifter_low, low);
        set_level(&mut self.compressor, commands.compressor);
    }
}

/// The full robot, ready to hand to the competition runtime.
pub struct VexRobot {
    robot: Robot<VexInputs, VexOutputs>,
}

impl VexRobot {
    /// Claims the devices and runs robot init.
    ///
    /// # Errors
    ///
    /// Returns the first problem [`GobblerConfig::validate`] finds.
    pub fn new(peripherals: Peripherals, config: GobblerConfig) -> Result<Self, ConfigError> {
        let inputs = VexInputs {
            driver:         peripherals.primary_controller,
            partner:        peripherals.partner_controller,
            buttons:        ButtonMap::default(),
            arm_extended:   AdiDigitalIn::new(peripherals.adi_g),
            arm_retracted:  AdiDigitalIn::new(peripherals.adi_h),
            shooter_switch: AdiDigitalIn::new(peripherals.adi_f),
        };
        let outputs = VexOutputs {
            left:         [
                Motor::new(peripherals.port_1, Gearset::Green, Direction::Forward),
                Motor::new(peripherals.port_2, Gearset::Green, Direction::Forward),
            ],
            right:        [
                Motor::new(peripherals.port_3, Gearset::Green, Direction::Reverse),
                Motor::new(peripherals.port_4, Gearset::Green, Direction::Reverse),
            ],
            roller:       Motor::new(peripherals.port_5, Gearset::Blue, Direction::Forward),
            shooter:      Motor::new(peripherals.port_7, Gearset::Red, Direction::Forward),
            arm:          Motor::new(peripherals.port_8, Gearset::Red, Direction::Forward),
            shifter_high: AdiDigitalOut::new(peripherals.adi_a),
            shifter_low:  AdiDigitalOut::new(peripherals.adi_b),
            compressor:   AdiDigitalOut::new(peripherals.adi_c),
        };

        let mut robot = Robot::new(config, inputs, outputs)?;
        robot.robot_init();
        Ok(Self { robot })
    }
}

impl Compete for VexRobot {
    async fn disabled(&mut self) {
        loop {
            self.robot.disabled_periodic();
            sleep(Controller::UPDATE_INTERVAL).await;
        }
    }

    async fn autonomous(&mut self) {
        self.robot.autonomous_init();
        loop {
            self.robot.autonomous_periodic();
            sleep(Controller::UPDATE_INTERVAL).await;
        }
    }

    async fn driver(&mut self) {
        self.robot.teleop_init();
        loop {
            self.robot.teleop_periodic();
            sleep(Controller::UPDATE_INTERVAL).await;
        }
    }
}

fn set_speed(motors: &mut [Motor], speed: f64) {
    for motor in motors {
        motor.set_voltage(speed * MAX_VOLTAGE).unwrap_or_else(|e| {
            warn!("Motor Set Voltage Error: {}", e);
        });
    }
}

fn set_level(device: &mut AdiDigitalOut, high: bool) {
    let result = if high { device.set_high() } else { device.set_low() };
    result.unwrap_or_else(|e| {
        warn!("ADI Set Level Error: {}", e);
    });
}

/// Reads a switch level. An unreadable switch reads as released (high).
fn read_level(switch: &AdiDigitalIn) -> bool {
    switch.is_high().unwrap_or_else(|e| {
        warn!("ADI Read Error: {}", e);
        true
    })
}

fn get_button_state(state: ControllerState, button: ControllerButton) -> ButtonState {
    match button {
        ControllerButton::ButtonA => state.button_a,
        ControllerButton::ButtonB => state.button_b,
        ControllerButton::ButtonX => state.button_x,
        ControllerButton::ButtonY => state.button_y,
        ControllerButton::ButtonUp => state.button_up,
        ControllerButton::ButtonDown => state.button_down,
        ControllerButton::ButtonLeft => state.button_left,
        ControllerButton::ButtonRight => state.button_right,
        ControllerButton::ButtonL1 => state.button_l1,
        ControllerButton::ButtonL2 => state.button_l2,
        ControllerButton::ButtonR1 => state.button_r1,
        ControllerButton::ButtonR2 => state.button_r2,
    }
}

fn get_state(controller: &Controller) -> ControllerState {
    controller.state().unwrap_or_else(|e| {
        warn!("Controller State Error: {}", e);
        ControllerState::default()
    })
}
