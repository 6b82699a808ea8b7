use std::path::{Path, PathBuf};

use log::info;
use rayon::prelude::*;

use crate::availability::AvailabilityThreshold;
use crate::media::Media;
use crate::progress::LogProgress;
use crate::visual_data::{visual_data_diff_image, visual_data_image, VisualDataType};
use crate::{CodecOptions, XstegError};

/// hides `data` in `carrier` and returns the key needed to read it back
pub fn encode(
    carrier: &Path,
    write_to_file: &Path,
    data: Vec<u8>,
    thresholds: Vec<AvailabilityThreshold>,
    key: Option<String>,
    options: CodecOptions,
) -> Result<String, XstegError> {
    let mut api = crate::api::encode::prepare()
        .with_options(options)
        .with_image(carrier)
        .with_output(write_to_file)
        .with_thresholds(thresholds)
        .with_data(data)
        .with_progress(LogProgress);
    if let Some(key) = key {
        api = api.use_key(key);
    }
    api.execute()
}

pub fn decode(
    secret_image: &Path,
    thresholds: Vec<AvailabilityThreshold>,
    key: Option<String>,
    options: CodecOptions,
) -> Result<Vec<u8>, XstegError> {
    let mut api = crate::api::decode::prepare()
        .with_options(options)
        .from_secret_image(secret_image)
        .with_thresholds(thresholds)
        .with_progress(LogProgress);
    if let Some(key) = key {
        api = api.use_key(key);
    }
    api.execute()
}

pub fn generate_key(thresholds: &[AvailabilityThreshold]) -> Result<String, XstegError> {
    if thresholds.is_empty() {
        return Err(XstegError::MissingThresholds);
    }
    Ok(crate::availability::generate_key(thresholds))
}

/// writes an image that is black where `data_type` is above `value` and white elsewhere
pub fn diff_map(
    image: &Path,
    write_to_file: &Path,
    data_type: VisualDataType,
    value: f32,
    options: &CodecOptions,
) -> Result<(), XstegError> {
    let media = Media::from_file(image)?;
    Media::from_image(visual_data_diff_image(&media, data_type, value))
        .save_with(write_to_file, &options.save)
}

/// Writes the visual data of every metric next to `image`, as `<image>.<TYPE>.<ext>`.
pub fn visual_data_maps(image: &Path, options: &CodecOptions) -> Result<Vec<PathBuf>, XstegError> {
    let media = Media::from_file(image)?;
    let extension = options.save.format.extension();

    VisualDataType::ALL
        .par_iter()
        .map(|data_type| {
            info!("Generating visual data image [{data_type}]");
            let mut target = image.as_os_str().to_owned();
            target.push(format!(".{data_type}.{extension}"));
            let target = PathBuf::from(target);

            Media::from_image(visual_data_image(&media, *data_type))
                .save_with(&target, &options.save)?;
            Ok(target)
        })
        .collect()
}

pub fn resize_absolute(
    image: &Path,
    write_to_file: &Path,
    width: u32,
    height: u32,
    options: &CodecOptions,
) -> Result<(), XstegError> {
    Media::from_file(image)?
        .resized_absolute(width, height)?
        .save_with(write_to_file, &options.save)
}

/// resizes by percent of the current width and height
pub fn resize_proportional(
    image: &Path,
    write_to_file: &Path,
    percent_width: f32,
    percent_height: f32,
    options: &CodecOptions,
) -> Result<(), XstegError> {
    Media::from_file(image)?
        .resized_proportional(percent_width, percent_height)?
        .save_with(write_to_file, &options.save)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec_options::SaveOptions;
    use crate::test_utils::{prepare_5x5_image, prepare_noisy_image};
    use tempfile::TempDir;

    fn write_image(dir: &TempDir, name: &str, image: image::RgbaImage) -> PathBuf {
        let path = dir.path().join(name);
        image.save(&path).unwrap();
        path
    }

    #[test]
    fn should_encode_and_decode_with_the_returned_key() {
        let dir = TempDir::new().unwrap();
        let carrier = write_image(&dir, "carrier.png", prepare_noisy_image(20, 20));
        let secret = dir.path().join("secret.png");

        let key = encode(
            &carrier,
            &secret,
            b"Hello World".to_vec(),
            vec!["SATURATION UP 1110 0.344".parse().unwrap()],
            None,
            CodecOptions::default(),
        )
        .unwrap();

        let data = decode(&secret, vec![], Some(key), CodecOptions::default()).unwrap();
        assert_eq!(data, b"Hello World");
    }

    #[test]
    fn should_write_outputs_in_the_format_of_their_extension() {
        let dir = TempDir::new().unwrap();
        let carrier = write_image(&dir, "carrier.png", prepare_noisy_image(20, 20));
        let secret = dir.path().join("secret.bmp");

        let key = encode(
            &carrier,
            &secret,
            b"Hello BMP".to_vec(),
            vec!["SATURATION UP 1110 0.344".parse().unwrap()],
            None,
            CodecOptions::default(),
        )
        .unwrap();
        assert_eq!(&std::fs::read(&secret).unwrap()[..2], b"BM");

        let data = decode(&secret, vec![], Some(key), CodecOptions::default()).unwrap();
        assert_eq!(data, b"Hello BMP");

        // PNG is configured, the extension asks for JPEG
        let resized = dir.path().join("resized.jpg");
        resize_absolute(&carrier, &resized, 10, 10, &CodecOptions::default()).unwrap();
        assert_eq!(&std::fs::read(&resized).unwrap()[..2], &[0xff, 0xd8]);
        let media = Media::from_file(&resized).unwrap();
        assert_eq!((media.width(), media.height()), (10, 10));

        let tga = dir.path().join("resized.tga");
        assert!(matches!(
            resize_absolute(&carrier, &tga, 10, 10, &CodecOptions::default()),
            Err(XstegError::UnsupportedMedia)
        ));
    }

    #[test]
    fn should_not_generate_a_key_without_thresholds() {
        assert!(matches!(generate_key(&[]), Err(XstegError::MissingThresholds)));
        assert_eq!(
            generate_key(&["GREEN DOWN 0010 0.75".parse().unwrap()]).unwrap(),
            "&1>V*0010+0.75"
        );
    }

    #[test]
    fn should_write_all_visual_data_maps() {
        let dir = TempDir::new().unwrap();
        let input = write_image(&dir, "5x5.png", prepare_5x5_image());

        let written = visual_data_maps(&input, &CodecOptions::default()).unwrap();

        assert_eq!(written.len(), 8);
        assert!(written.contains(&dir.path().join("5x5.png.SATURATION.png")));
        for path in written {
            let map = Media::from_file(&path).unwrap();
            assert_eq!((map.width(), map.height()), (5, 5));
        }
    }

    #[test]
    fn should_write_a_diff_map() {
        let dir = TempDir::new().unwrap();
        let input = write_image(&dir, "5x5.png", prepare_5x5_image());
        let output = dir.path().join("diff.png");

        diff_map(
            &input,
            &output,
            VisualDataType::ColorRed,
            0.2,
            &CodecOptions::default(),
        )
        .unwrap();

        let map = Media::from_file(&output).unwrap();
        // red is 0 at the top left and 96 at the bottom right
        assert_eq!(map.pixel(0), Some([255, 255, 255, 255]));
        assert_eq!(map.pixel(24), Some([0, 0, 0, 255]));
    }

    #[test]
    fn should_resize_images() {
        let dir = TempDir::new().unwrap();
        let input = write_image(&dir, "5x5.png", prepare_5x5_image());
        let output = dir.path().join("resized.jpg");
        let options = CodecOptions::default().with_save_options(SaveOptions::jpeg(75));

        resize_absolute(&input, &output, 3, 7, &options).unwrap();
        let resized = Media::from_file(&output).unwrap();
        assert_eq!((resized.width(), resized.height()), (3, 7));

        resize_proportional(&input, &output, 200.0, 100.0, &options).unwrap();
        let resized = Media::from_file(&output).unwrap();
        assert_eq!((resized.width(), resized.height()), (10, 5));

        assert!(resize_absolute(&input, &output, 0, 7, &options).is_err());
    }
}
