use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use blockfall::images::ImageRegistry;

fn write_png(path: &Path, width: u32, height: u32, rgba: [u8; 4]) {
    let file = File::create(path).unwrap();
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().unwrap();
    let data: Vec<u8> = rgba
        .iter()
        .copied()
        .cycle()
        .take((width * height * 4) as usize)
        .collect();
    writer.write_image_data(&data).unwrap();
}

#[test]
fn png_files_register_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let red = dir.path().join("red.png");
    let blue = dir.path().join("blue.png");
    write_png(&red, 3, 2, [255, 0, 0, 255]);
    write_png(&blue, 1, 1, [0, 0, 255, 255]);

    let mut registry = ImageRegistry::new();
    assert_eq!(registry.add_path(&red), 0);
    assert_eq!(registry.add_path(&blue), 1);

    let first = registry.resolve(0).unwrap();
    assert_eq!((first.width(), first.height()), (3, 2));
    assert_eq!(first.pixel(2, 1), [255, 0, 0, 255]);
    assert_eq!(registry.resolve(1).unwrap().pixel(0, 0), [0, 0, 255, 255]);
}

#[test]
fn garbage_bytes_take_a_slot_but_do_not_resolve() {
    let dir = tempfile::tempdir().unwrap();
    let bogus = dir.path().join("bogus.png");
    std::fs::write(&bogus, b"definitely not a png").unwrap();
    let good = dir.path().join("good.png");
    write_png(&good, 2, 2, [10, 20, 30, 255]);

    let mut registry = ImageRegistry::new();
    registry.add_path(&bogus);
    registry.add_path(&good);

    assert_eq!(registry.len(), 2);
    assert!(registry.resolve(0).is_none());
    assert_eq!(registry.get(0).unwrap().source, bogus);
    assert!(registry.resolve(1).is_some());
}
