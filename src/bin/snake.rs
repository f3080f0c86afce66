//! Snake firmware for the badge.
//!
//! Controls:
//! - Joystick: steer (reversing is ignored)
//! - Stick click: pause / resume, restart after game over

#![no_std]
#![no_main]

use defmt::info;
use embassy_executor::Spawner;
use esp_backtrace as _;
use esp_hal::{
    gpio::Input,
    timer::timg::TimerGroup,
};
use esp_println as _;
#[allow(clippy::wildcard_imports)]
use matrix_snake::board::*;
use matrix_snake::{
    CellMatrix,
    GameConfig,
    InputReader,
    MainLoop,
    MatrixLayout,
    MovementEngine,
};
use rand::{
    SeedableRng,
    rngs::SmallRng,
};

esp_bootloader_esp_idf::esp_app_desc!();

const CONFIG: GameConfig = GameConfig::new();

#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    let peripherals = matrix_snake::board::init();
    let resources = matrix_snake::split_resources!(peripherals);

    esp_alloc::heap_allocator!(size: 32 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let _backlight: Backlight = resources.backlight.into();
    let display: Display<'static> = resources.display.into();
    let segments: ScorePins = resources.score.into();
    let joystick: Joystick = resources.joystick.into();
    let button: Input<'static> = resources.button.into();

    let seed = seed();
    info!("snake starting, seed {=u64:#x}", seed);

    let mut game = MainLoop::new(
        InputReader::new(joystick, button, CONFIG.joystick),
        CellMatrix::new(display, MatrixLayout::badge()),
        segments,
        BoardClock,
        MovementEngine::new(SmallRng::seed_from_u64(seed), CONFIG.pace),
        CONFIG.timing,
    );

    // Blocking from here on, nothing else runs on this core.
    let Err(err) = game.run();
    defmt::panic!("game loop stopped: {}", err)
}
