use cabinet_core::buffer::FrameBuffer;
use cabinet_core::pump::Surface;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, TextureCreator};
use sdl2::video::{Window, WindowContext};

use crate::overlay;
use crate::screenshot;

/// The visible display surface: an SDL window at native resolution times
/// an integer scale, fed by a streaming RGBA texture on every blit. The
/// vsync-synchronized present inside [`Surface::blit`] is what paces the
/// host loop to the display refresh.
pub struct Video {
    canvas: Canvas<Window>,
    texture_creator: TextureCreator<WindowContext>,
    width: u32,
    height: u32,
    scratch: Vec<u8>,
    fps_text: Option<String>,
    screenshot_pending: bool,
}

impl Video {
    /// Create an SDL window and renderer for the given native resolution.
    pub fn new(
        sdl_video: &sdl2::VideoSubsystem,
        title: &str,
        native_width: u32,
        native_height: u32,
        scale: u32,
    ) -> Self {
        let window = sdl_video
            .window(title, native_width * scale, native_height * scale)
            .position_centered()
            .build()
            .expect("Failed to create window");

        let canvas = window
            .into_canvas()
            .accelerated()
            .present_vsync()
            .build()
            .expect("Failed to create canvas");

        let texture_creator = canvas.texture_creator();

        Self {
            canvas,
            texture_creator,
            width: native_width,
            height: native_height,
            scratch: Vec::new(),
            fps_text: None,
            screenshot_pending: false,
        }
    }

    /// Label to composite onto upcoming frames; None hides it.
    pub fn set_fps_text(&mut self, text: Option<String>) {
        self.fps_text = text;
    }

    /// Capture the next blitted frame to a PNG in the working directory.
    pub fn request_screenshot(&mut self) {
        self.screenshot_pending = true;
    }
}

impl Surface for Video {
    fn pixel_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Upload the RGBA8888 frame to a streaming texture and present it.
    fn blit(&mut self, frame: &FrameBuffer) {
        // Screenshots capture the clean frame, before any overlay.
        if self.screenshot_pending {
            self.screenshot_pending = false;
            match screenshot::save(frame) {
                Ok(path) => log::info!("wrote {}", path.display()),
                Err(err) => log::warn!("screenshot failed: {err}"),
            }
        }

        // The overlay goes onto a scratch copy; the pump's buffer is
        // never written by the host side.
        self.scratch.clear();
        self.scratch.extend_from_slice(frame.data());
        if let Some(text) = &self.fps_text {
            overlay::draw_fps(&mut self.scratch, self.width as usize, text);
        }

        let mut texture = self
            .texture_creator
            .create_texture_streaming(PixelFormatEnum::RGBA32, self.width, self.height)
            .expect("Failed to create texture");

        texture
            .update(None, &self.scratch, (self.width * 4) as usize)
            .expect("Failed to update texture");

        self.canvas.clear();
        self.canvas
            .copy(&texture, None, None)
            .expect("Failed to copy texture");
        self.canvas.present();
    }
}
