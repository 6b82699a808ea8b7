use criterion::{criterion_group, criterion_main, Criterion};
use image::{ImageBuffer, Rgba};
use xsteg_core::{Media, Steganographer};

pub fn image_encoding(c: &mut Criterion) {
    c.bench_function("Image Encoding", |b| {
        let plain_image = ImageBuffer::from_fn(512, 512, |x, y| {
            Rgba([x as u8, y as u8, (x * y) as u8, 255])
        });
        let secret_message = b"Hello World!".repeat(100);

        b.iter(|| {
            let mut steganographer = Steganographer::new(Media::from_image(plain_image.clone()));
            steganographer
                .restore_key("&S>A*1110+0.3&L>V*1110+0.2")
                .expect("Benchmark key is invalid");
            steganographer
                .write_data(&secret_message)
                .expect("Cannot write secret message");
        })
    });
}

criterion_group!(benches, image_encoding);
criterion_main!(benches);
