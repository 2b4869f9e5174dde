//! Demo host: runs a ROM in a window with audio.
//!
//! Usage: `famicore path/to/game.nes`
//!
//! The core produces a 256×240 0xAABBGGRR framebuffer per frame and 16-bit
//! mono samples at 44.1 kHz; this host converts pixels to minifb's 0RGB
//! layout during blit, feeds samples to rodio, and maps the keyboard onto
//! controller 1 (Z = A, X = B, Shift = Select, Enter = Start, arrows = d-pad).

use std::env;
use std::path::Path;
use std::process;
use std::time::{Duration, Instant};

use ansi_term::Colour::Red;
use famicore::nes::{Nes, FRAME_HEIGHT, FRAME_WIDTH};
use minifb::{Key, Window, WindowOptions};
use rodio::OutputStream;

/// NTSC frame pacing: ~60.0988 Hz on hardware, 16.67 ms per frame here.
const FRAME_DURATION: Duration = Duration::from_nanos(16_666_667);

/// Output sample rate; matches the APU downsampler.
const SAMPLE_RATE: u32 = 44_100;

/// Keyboard → controller-1 button events. Button indices follow the shift
/// register order: 0=A, 1=B, 2=Select, 3=Start, 4=Up, 5=Down, 6=Left, 7=Right.
fn apply_input(nes: &mut Nes, window: &Window) {
    let bindings: [(Key, u8); 9] = [
        (Key::Z, 0),
        (Key::X, 1),
        (Key::LeftShift, 2),
        (Key::RightShift, 2),
        (Key::Enter, 3),
        (Key::Up, 4),
        (Key::Down, 5),
        (Key::Left, 6),
        (Key::Right, 7),
    ];
    for (key, button) in bindings {
        nes.send_input(button, window.is_key_down(key));
    }
}

fn main() {
    let path = match env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("usage: famicore <rom.nes>");
            process::exit(2);
        }
    };

    let mut nes = match Nes::load_rom(&path) {
        Ok(nes) => nes,
        Err(err) => {
            eprintln!("{} failed to load {}: {}", Red.bold().paint("ERROR"), path, err);
            process::exit(1);
        }
    };

    let title = format!(
        "{} - famicore",
        Path::new(&path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("ROM")
    );
    let mut window = Window::new(
        &title,
        FRAME_WIDTH,
        FRAME_HEIGHT,
        WindowOptions {
            resize: true,
            scale: minifb::Scale::X2,
            scale_mode: minifb::ScaleMode::AspectRatioStretch,
            ..WindowOptions::default()
        },
    )
    .expect("Failed to create window");
    window.set_target_fps(60);

    // Audio: default device, sink fed from the APU ring each frame.
    let (_stream, stream_handle) = OutputStream::try_default().expect("No default audio device");
    let sink = rodio::Sink::try_new(&stream_handle).expect("Failed to create audio sink");

    let mut frame = vec![0u32; FRAME_WIDTH * FRAME_HEIGHT];
    let mut display = vec![0u32; FRAME_WIDTH * FRAME_HEIGHT];
    let mut audio = [0i16; 2048];

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let frame_start = Instant::now();

        apply_input(&mut nes, &window);
        nes.step_frame(&mut frame);

        // Core pixels are 0xAABBGGRR; minifb wants 0RGB. Swap R and B.
        for (dst, &src) in display.iter_mut().zip(frame.iter()) {
            *dst = (src & 0x0000FF00) | ((src & 0xFF) << 16) | ((src >> 16) & 0xFF);
        }
        window
            .update_with_buffer(&display, FRAME_WIDTH, FRAME_HEIGHT)
            .expect("Failed to update window");

        let n = nes.get_audio_samples(&mut audio);
        if n > 0 {
            let samples: Vec<f32> = audio[..n].iter().map(|&s| s as f32 / 32768.0).collect();
            sink.append(rodio::buffer::SamplesBuffer::new(1, SAMPLE_RATE, samples));
        }

        // Pace to ~60 fps; emulation runs much faster than the real console.
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }
}
