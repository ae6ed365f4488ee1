//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
use crate::{
    Cursor, Error, EventKeyboard, EventMouse, EventResize, Key, KeyModifiers, MouseButton, PlatformBackend, PlatformWindow, ThreadTimers, TimerQueue, dim,
    vec2,
};

use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::mouse::SystemCursor;
use sdl2::pixels::PixelFormatEnum;

/// Thin SDL2 adapter: translates native events into the core event structs,
/// drains the timer queue every loop iteration, and blits the window's pixel
/// buffer into a streaming texture.
pub struct Sdl2Backend {
    timer_queue: TimerQueue,
    sdl: Option<sdl2::Sdl>,
    video: Option<sdl2::VideoSubsystem>,
    window: Option<sdl2::video::Window>,
    cursor: Option<sdl2::mouse::Cursor>,
}

fn map_mouse_button(button: sdl2::mouse::MouseButton) -> MouseButton {
    match button {
        sdl2::mouse::MouseButton::Left => MouseButton::LEFT,
        sdl2::mouse::MouseButton::Right => MouseButton::RIGHT,
        sdl2::mouse::MouseButton::Middle => MouseButton::MIDDLE,
        _ => MouseButton::NONE,
    }
}

fn map_modifiers(keymod: sdl2::keyboard::Mod) -> KeyModifiers {
    let mut modifiers = KeyModifiers::NONE;
    if keymod.intersects(sdl2::keyboard::Mod::LSHIFTMOD | sdl2::keyboard::Mod::RSHIFTMOD) {
        modifiers |= KeyModifiers::SHIFT;
    }
    if keymod.intersects(sdl2::keyboard::Mod::LCTRLMOD | sdl2::keyboard::Mod::RCTRLMOD) {
        modifiers |= KeyModifiers::CTRL;
    }
    if keymod.intersects(sdl2::keyboard::Mod::LALTMOD | sdl2::keyboard::Mod::RALTMOD) {
        modifiers |= KeyModifiers::ALT;
    }
    modifiers
}

/// Maps the non-printable keys the core understands. Printable input arrives
/// through `TextInput` instead, so character keys return `None` here.
fn map_keycode(keycode: Keycode) -> Option<Key> {
    match keycode {
        Keycode::Left => Some(Key::Left),
        Keycode::Right => Some(Key::Right),
        Keycode::Up => Some(Key::Up),
        Keycode::Down => Some(Key::Down),
        Keycode::Home => Some(Key::Home),
        Keycode::End => Some(Key::End),
        Keycode::PageUp => Some(Key::PageUp),
        Keycode::PageDown => Some(Key::PageDown),
        Keycode::Backspace => Some(Key::Backspace),
        Keycode::Delete => Some(Key::Delete),
        Keycode::Tab => Some(Key::Tab),
        Keycode::Return | Keycode::KpEnter => Some(Key::Return),
        Keycode::Escape => Some(Key::Escape),
        Keycode::Space => Some(Key::Char(' ')),
        _ => None,
    }
}

impl Sdl2Backend {
    /// Creates an unopened backend.
    pub fn new() -> Self { Self { timer_queue: TimerQueue::new(), sdl: None, video: None, window: None, cursor: None } }

    /// Convenience: open, show, and run in one call.
    pub fn run(&mut self, window: &mut PlatformWindow) -> Result<(), Error> {
        self.open_window(window)?;
        self.show_window()?;
        self.main_loop(window)
    }
}

impl Default for Sdl2Backend {
    fn default() -> Self { Self::new() }
}

impl PlatformBackend for Sdl2Backend {
    fn open_window(&mut self, window: &PlatformWindow) -> Result<(), Error> {
        let sdl = sdl2::init().map_err(|e| Error::WindowCreation(e.to_string()))?;
        let video = sdl.video().map_err(|e| Error::WindowCreation(e.to_string()))?;
        let size = window.size();
        let native = video
            .window(window.title(), size.width.max(1) as u32, size.height.max(1) as u32)
            .position_centered()
            .resizable()
            .hidden()
            .build()
            .map_err(|e| Error::WindowCreation(e.to_string()))?;
        tracing::debug!("native window opened: {}x{}", size.width, size.height);
        self.sdl = Some(sdl);
        self.video = Some(video);
        self.window = Some(native);
        Ok(())
    }

    fn show_window(&mut self) -> Result<(), Error> {
        match self.window.as_mut() {
            Some(window) => {
                window.show();
                Ok(())
            }
            None => Err(Error::Backend("show_window before open_window".into())),
        }
    }

    fn invalidate(&mut self) {
        // redraws are driven by the window's own dirty flag; nothing to do
        // beyond waking the next loop iteration, which polls anyway
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        let shape = match cursor {
            Cursor::Arrow => SystemCursor::Arrow,
            Cursor::Hand => SystemCursor::Hand,
            Cursor::IBeam => SystemCursor::IBeam,
        };
        match sdl2::mouse::Cursor::from_system(shape) {
            Ok(native) => {
                native.set();
                // keep the cursor alive; SDL reverts when it drops
                self.cursor = Some(native);
            }
            Err(e) => tracing::warn!("cursor change failed: {e}"),
        }
    }

    fn main_loop(&mut self, window: &mut PlatformWindow) -> Result<(), Error> {
        let sdl = self.sdl.clone().ok_or_else(|| Error::Backend("main_loop before open_window".into()))?;
        let native = self.window.take().ok_or_else(|| Error::Backend("main_loop before open_window".into()))?;
        let mut canvas = native.into_canvas().build().map_err(|e| Error::WindowCreation(e.to_string()))?;
        let texture_creator = canvas.texture_creator();

        window.set_timer_host(Box::new(ThreadTimers::new(self.timer_queue.sender())));

        let mut size = window.size();
        let mut texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::RGBA32, size.width as u32, size.height as u32)
            .map_err(|e| Error::WindowCreation(e.to_string()))?;

        let mut event_pump = sdl.event_pump().map_err(|e| Error::Backend(e.to_string()))?;
        let mut pressed = false;
        'running: loop {
            for event in event_pump.poll_iter() {
                match event {
                    Event::Quit { .. } => break 'running,
                    Event::Window { win_event: WindowEvent::Close, .. } => break 'running,
                    Event::Window { win_event: WindowEvent::Resized(w, h), .. } | Event::Window { win_event: WindowEvent::SizeChanged(w, h), .. } => {
                        window.on_resize(&EventResize { size: dim(w, h), position: vec2(0, 0) });
                    }
                    Event::MouseMotion { x, y, .. } => window.on_mouse(&EventMouse::moved(x, y, pressed)),
                    Event::MouseWheel { y, .. } => {
                        let state = event_pump.mouse_state();
                        window.on_mouse(&EventMouse::scrolled(state.x(), state.y(), y));
                    }
                    Event::MouseButtonDown { x, y, mouse_btn, .. } => {
                        pressed = true;
                        window.on_mouse(&EventMouse::press(map_mouse_button(mouse_btn), x, y));
                    }
                    Event::MouseButtonUp { x, y, mouse_btn, .. } => {
                        pressed = false;
                        window.on_mouse(&EventMouse::release(map_mouse_button(mouse_btn), x, y));
                    }
                    Event::KeyDown { keycode: Some(keycode), keymod, .. } => {
                        if let Some(key) = map_keycode(keycode) {
                            window.on_keyboard(&EventKeyboard { key, keydown: true, modifiers: map_modifiers(keymod) });
                        }
                    }
                    Event::KeyUp { keycode: Some(keycode), keymod, .. } => {
                        if let Some(key) = map_keycode(keycode) {
                            window.on_keyboard(&EventKeyboard { key, keydown: false, modifiers: map_modifiers(keymod) });
                        }
                    }
                    Event::TextInput { text, .. } => {
                        for ch in text.chars() {
                            window.on_keyboard(&EventKeyboard::down(Key::Char(ch)));
                        }
                    }
                    _ => {}
                }
            }

            window.pump_timers();
            for id in self.timer_queue.drain() {
                window.process_timer(id);
            }
            window.pump_timers();

            if window.needs_redraw() {
                window.draw();
                let new_size = window.size();
                if new_size.width != size.width || new_size.height != size.height {
                    size = new_size;
                    texture = texture_creator
                        .create_texture_streaming(PixelFormatEnum::RGBA32, size.width as u32, size.height as u32)
                        .map_err(|e| Error::WindowCreation(e.to_string()))?;
                }
                let mut bytes = Vec::with_capacity(window.content().buffer().len() * 4);
                for pixel in window.content().buffer() {
                    bytes.extend_from_slice(&pixel.to_le_bytes());
                }
                texture
                    .update(None, &bytes, (size.width * 4) as usize)
                    .map_err(|e| Error::Backend(e.to_string()))?;
                canvas.clear();
                canvas.copy(&texture, None, None).map_err(|e| Error::Backend(e.to_string()))?;
                canvas.present();
            }

            std::thread::sleep(std::time::Duration::new(0, 1_000_000_000u32 / 60));
        }

        window.on_close();
        Ok(())
    }
}
