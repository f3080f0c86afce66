//! ESP32-S3 badge wiring.
//!
//! - **Matrix**: the badge's 320×170 ST7789 LCD over SPI with DMA, cells
//!   drawn by [`CellMatrix`](crate::CellMatrix)
//! - **Joystick**: HW-504 module, X on GPIO9 and Y on GPIO10 (ADC1), read at
//!   12 bits and scaled to 10
//! - **Button**: the badge's stick click on GPIO14, active low
//! - **Score**: 3461BS-1 common-anode display, digit commons on GPIO39-42,
//!   segments a..g, dp on GPIO47, 48, 35, 36, 37, 8, 18, 3 through 220 Ω.
//!   UART0 (GPIO43/44) stays free for the console.

use embedded_hal::delay::DelayNs;
use embedded_hal_bus::spi::ExclusiveDevice;
use esp_hal::{
    Async,
    Blocking,
    analog::adc::{
        Adc,
        AdcConfig,
        AdcPin,
        Attenuation,
    },
    assign_resources,
    clock::CpuClock,
    dma::{
        DmaRxBuf,
        DmaTxBuf,
    },
    dma_buffers,
    gpio::{
        AnyPin,
        Input,
        InputConfig,
        Level,
        Output,
        OutputConfig,
        Pull,
    },
    peripherals::{
        ADC1,
        GPIO9,
        GPIO10,
    },
    spi::master::Spi,
    time::Rate,
};

use crate::{
    AxisSample,
    Axes,
    Clock,
    Error,
    PinSegmentDisplay,
};

/// StaticCell helper, allocates a value into a `static` exactly once.
#[macro_export]
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write($val);
        x
    }};
}

// ── Pin / peripheral assignments ────────────────────────────────────────────

assign_resources! {
    pub Resources<'d> {
        display: DisplayResources<'d> {
            dc: GPIO15,
            rst: GPIO7,
            sck: GPIO4,
            cs: GPIO6,
            miso: GPIO16,
            mosi: GPIO5,
            spi: SPI2,
            dma: DMA_CH0,
        },
        backlight: BacklightResources<'d> {
            led: GPIO19,
        },
        joystick: JoystickResources<'d> {
            x: GPIO9,
            y: GPIO10,
            adc: ADC1,
        },
        button: ButtonResources<'d> {
            stick: GPIO14,
        },
        score: ScoreResources<'d> {
            digit0: GPIO39,
            digit1: GPIO40,
            digit2: GPIO41,
            digit3: GPIO42,
            a: GPIO47,
            b: GPIO48,
            c: GPIO35,
            d: GPIO36,
            e: GPIO37,
            // Microphone WS and LED strip data on the badge, unused here.
            f: GPIO8,
            g: GPIO18,
            // Only strapped at reset when the JTAG-select eFuse is burned.
            dp: GPIO3,
        }
    }
}

/// Initialise the badge and return the raw peripheral set.
///
/// Call once at the top of `main`, then break the peripherals up with
/// [`split_resources!`](crate::split_resources).
#[must_use]
pub fn init() -> esp_hal::peripherals::Peripherals {
    esp_hal::init(esp_hal::Config::default().with_cpu_clock(CpuClock::_160MHz))
}

impl From<esp_hal::peripherals::Peripherals> for Resources<'_> {
    fn from(peripherals: esp_hal::peripherals::Peripherals) -> Self {
        split_resources!(peripherals)
    }
}

/// Seed for the food RNG from the hardware random number generator.
pub fn seed() -> u64 {
    let rng = esp_hal::rng::Rng::new();
    (u64::from(rng.random()) << 32) | u64::from(rng.random())
}

// ── Time ────────────────────────────────────────────────────────────────────

/// Embassy time driver as the loop clock. Delays busy-wait.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardClock;

impl DelayNs for BoardClock {
    fn delay_ns(&mut self, ns: u32) {
        embassy_time::Delay.delay_ns(ns);
    }

    fn delay_us(&mut self, us: u32) {
        embassy_time::Delay.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        embassy_time::Delay.delay_ms(ms);
    }
}

impl Clock for BoardClock {
    fn now_ms(&self) -> u64 {
        embassy_time::Instant::now().as_millis()
    }
}

// ── LCD ─────────────────────────────────────────────────────────────────────

type SpiInterface<'a> = mipidsi::interface::SpiInterface<
    'a,
    ExclusiveDevice<esp_hal::spi::master::SpiDmaBus<'a, Async>, Output<'a>, esp_hal::delay::Delay>,
    Output<'a>,
>;

/// The badge's ST7789 LCD, an `embedded-graphics` draw target.
pub type Display<'a> = mipidsi::Display<SpiInterface<'a>, mipidsi::models::ST7789, Output<'a>>;

/// Bytes staged per SPI write. One 18×18 cell in RGB565 fits.
const PIXEL_BUFFER: usize = 1024;

impl<'a> From<DisplayResources<'a>> for Display<'a> {
    fn from(res: DisplayResources<'a>) -> Self {
        let (rx_buffer, rx_descriptors, tx_buffer, tx_descriptors) = dma_buffers!(4096);
        let dma_rx_buf = DmaRxBuf::new(rx_descriptors, rx_buffer).unwrap();
        let dma_tx_buf = DmaTxBuf::new(tx_descriptors, tx_buffer).unwrap();

        let mut delay = esp_hal::delay::Delay::new();

        let dc = Output::new(res.dc, Level::Low, OutputConfig::default());
        let rst = Output::new(res.rst, Level::High, OutputConfig::default());
        let cs = Output::new(res.cs, Level::High, OutputConfig::default());

        let spi = Spi::new(
            res.spi,
            esp_hal::spi::master::Config::default().with_frequency(Rate::from_mhz(80)),
        )
        .unwrap()
        .with_sck(res.sck)
        .with_mosi(res.mosi)
        .with_miso(res.miso)
        .with_dma(res.dma)
        .with_buffers(dma_rx_buf, dma_tx_buf)
        .into_async();

        let spi_device = ExclusiveDevice::new(spi, cs, delay).unwrap();
        let buffer = mk_static!([u8; PIXEL_BUFFER], [0_u8; PIXEL_BUFFER]);
        let di = mipidsi::interface::SpiInterface::new(spi_device, dc, buffer);

        mipidsi::Builder::new(mipidsi::models::ST7789, di)
            .reset_pin(rst)
            .display_size(170, 320)
            .invert_colors(mipidsi::options::ColorInversion::Inverted)
            .orientation(
                mipidsi::options::Orientation::new().rotate(mipidsi::options::Rotation::Deg90),
            )
            .display_offset(35, 0)
            .init(&mut delay)
            .unwrap()
    }
}

/// Keeps the LCD backlight on for as long as it lives.
pub struct Backlight {
    _pin: Output<'static>,
}

impl From<BacklightResources<'static>> for Backlight {
    fn from(res: BacklightResources<'static>) -> Self {
        Self {
            _pin: Output::new(res.led, Level::High, OutputConfig::default()),
        }
    }
}

// ── Joystick ────────────────────────────────────────────────────────────────

/// HW-504 axes on ADC1.
pub struct Joystick {
    adc: Adc<'static, ADC1<'static>, Blocking>,
    x: AdcPin<GPIO9<'static>, ADC1<'static>>,
    y: AdcPin<GPIO10<'static>, ADC1<'static>>,
}

impl From<JoystickResources<'static>> for Joystick {
    fn from(res: JoystickResources<'static>) -> Self {
        let mut config = AdcConfig::new();
        let x = config.enable_pin(res.x, Attenuation::_11dB);
        let y = config.enable_pin(res.y, Attenuation::_11dB);
        Self {
            adc: Adc::new(res.adc, config),
            x,
            y,
        }
    }
}

impl Axes for Joystick {
    fn sample(&mut self) -> Result<AxisSample, Error> {
        let x = nb::block!(self.adc.read_oneshot(&mut self.x)).map_err(|_| Error::Joystick)?;
        let y = nb::block!(self.adc.read_oneshot(&mut self.y)).map_err(|_| Error::Joystick)?;
        // 12-bit conversions onto the 10-bit threshold scale.
        Ok(AxisSample { x: x >> 2, y: y >> 2 })
    }
}

/// Stick click, pulled up.
impl From<ButtonResources<'static>> for Input<'static> {
    fn from(res: ButtonResources<'static>) -> Self {
        Input::new(res.stick, InputConfig::default().with_pull(Pull::Up))
    }
}

// ── Score display ───────────────────────────────────────────────────────────

pub type ScorePins = PinSegmentDisplay<Output<'static>, Output<'static>>;

impl From<ScoreResources<'static>> for ScorePins {
    fn from(res: ScoreResources<'static>) -> Self {
        // Digits deselected, segments dark.
        let digit = |pin: AnyPin<'static>| Output::new(pin, Level::Low, OutputConfig::default());
        let segment =
            |pin: AnyPin<'static>| Output::new(pin, Level::High, OutputConfig::default());
        PinSegmentDisplay::new(
            [
                digit(res.digit0.into()),
                digit(res.digit1.into()),
                digit(res.digit2.into()),
                digit(res.digit3.into()),
            ],
            [
                segment(res.a.into()),
                segment(res.b.into()),
                segment(res.c.into()),
                segment(res.d.into()),
                segment(res.e.into()),
                segment(res.f.into()),
                segment(res.g.into()),
                segment(res.dp.into()),
            ],
        )
    }
}
