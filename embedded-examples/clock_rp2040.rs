//! Full example code for running an IV-18 tube as a clock. This runs on a Raspberry Pi Pico, with
//! the MAX6921 DIN on GP11 (SPI1 TX), CLK on GP10 (SPI1 SCK) and LOAD on GP13.

#![deny(unsafe_code)]
#![no_main]
#![no_std]

use cortex_m::delay::Delay;
use embedded_hal::spi::MODE_0;
use fugit::RateExtU32;
use max6921 as vfd;
use panic_halt as _;
use rp2040_hal as hal;
use rp2040_hal::clocks::Clock;
use rp2040_hal::pac;

#[link_section = ".boot2"]
#[used]
pub static BOOT2: [u8; 256] = rp2040_boot2::BOOT_LOADER_GENERIC_03H;

const XTAL_FREQ_HZ: u32 = 12_000_000;
const SPI_CLOCK_HZ: u32 = 2_000_000;

#[hal::entry]
fn main() -> ! {
    let mut pac = pac::Peripherals::take().unwrap();
    let core = pac::CorePeripherals::take().unwrap();
    let mut watchdog = hal::Watchdog::new(pac.WATCHDOG);
    let clocks = hal::clocks::init_clocks_and_plls(
        XTAL_FREQ_HZ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    let sio = hal::Sio::new(pac.SIO);
    let pins = hal::gpio::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    // SPI1 on GP10 (SCK) and GP11 (TX). The MAX6921 has no data output, so no RX pin.
    let sck = pins.gpio10.into_function::<hal::gpio::FunctionSpi>();
    let mosi = pins.gpio11.into_function::<hal::gpio::FunctionSpi>();
    let spi = hal::spi::Spi::<_, _, _, 8>::new(pac.SPI1, (mosi, sck)).init(
        &mut pac.RESETS,
        clocks.peripheral_clock.freq(),
        SPI_CLOCK_HZ.Hz(),
        MODE_0,
    );

    // GP13 drives LOAD. The driver pulls it low during init.
    let latch = pins.gpio13.into_push_pull_output();
    let delay = Delay::new(core.SYST, clocks.system_clock.freq().to_Hz());

    let mut disp = vfd::Display::new(
        vfd::SpiInterface::new(spi, latch, delay).max_clock_hz(SPI_CLOCK_HZ),
    );
    disp.init(Some(vfd::Config::new().clock_hz(SPI_CLOCK_HZ).pins(11, 10, 13)))
        .unwrap();

    // Lamp test: every segment on for about a second.
    disp.fill(vfd::Segments::ALL).unwrap();
    for _ in 0..74 {
        disp.refresh().unwrap();
    }

    // Count seconds from midnight by sweeps. One default sweep takes 13.5ms plus transmission
    // time, so 74 sweeps make roughly one second.
    let mut seconds: u32 = 0;
    loop {
        let h = (seconds / 3600 % 24) as u8;
        let m = (seconds / 60 % 60) as u8;
        let s = (seconds % 60) as u8;
        disp.write_time(h, m, s).unwrap();
        for _ in 0..74 {
            disp.refresh().unwrap();
        }
        seconds = (seconds + 1) % 86_400;
    }
}
