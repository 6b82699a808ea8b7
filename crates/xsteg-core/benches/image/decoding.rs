use criterion::{criterion_group, criterion_main, Criterion};
use image::{ImageBuffer, Rgba};
use xsteg_core::{Media, Steganographer};

const KEY: &str = "&S>A*1110+0.3&L>V*1110+0.2";

pub fn image_decoding(c: &mut Criterion) {
    let plain_image = ImageBuffer::from_fn(512, 512, |x, y| {
        Rgba([x as u8, y as u8, (x * y) as u8, 255])
    });
    let mut encoder = Steganographer::new(Media::from_image(plain_image));
    encoder.restore_key(KEY).expect("Benchmark key is invalid");
    encoder
        .write_data(&b"Hello World!".repeat(100))
        .expect("Cannot write secret message");
    let secret_image = encoder.into_media();

    c.bench_function("Image Decoding", |b| {
        b.iter(|| {
            let mut decoder = Steganographer::new(secret_image.clone());
            decoder.restore_key(KEY).expect("Benchmark key is invalid");
            decoder.read_data().expect("Cannot read secret message")
        })
    });
}

criterion_group!(benches, image_decoding);
criterion_main!(benches);
