use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use cabinet_core::buffer::FrameBuffer;

/// Write `frame` as a PNG to the first free `cabinet-NNNN.png` in the
/// working directory and return the path.
pub fn save(frame: &FrameBuffer) -> std::io::Result<PathBuf> {
    let path = next_free_path();
    let file = File::create(&path)?;

    let w = &mut BufWriter::new(file);
    let mut encoder = png::Encoder::new(w, frame.width(), frame.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(frame.data())?;
    Ok(path)
}

fn next_free_path() -> PathBuf {
    let mut index = 0u32;
    loop {
        let path = PathBuf::from(format!("cabinet-{index:04}.png"));
        if !path.exists() {
            return path;
        }
        index += 1;
    }
}
