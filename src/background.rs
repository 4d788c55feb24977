use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use image::imageops::FilterType;
use image::DynamicImage;

use crate::common::error::{WeaveError, WeaveResult};

// Background source
//------------------------------------------------------------------------------

/// Where the background image comes from. Anything starting with `http` is
/// treated as remote, everything else as a local path.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum BackgroundSource {
    Path(PathBuf),
    Url(String),
}

impl From<&str> for BackgroundSource {
    fn from(raw: &str) -> Self {
        if raw.starts_with("http") {
            Self::Url(raw.to_string())
        } else {
            Self::Path(PathBuf::from(raw))
        }
    }
}

impl From<String> for BackgroundSource {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl Display for BackgroundSource {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Url(u) => f.write_str(u),
        }
    }
}

impl BackgroundSource {
    /// Fetches and decodes the image. Remote sources surface HTTP failure
    /// statuses as fetch errors before any decoding is attempted.
    pub fn load(&self) -> WeaveResult<DynamicImage> {
        match self {
            Self::Path(p) => image::open(p).map_err(WeaveError::Decode),
            Self::Url(u) => {
                let resp = reqwest::blocking::get(u)?.error_for_status()?;
                let bytes = resp.bytes()?;
                image::load_from_memory(&bytes).map_err(WeaveError::Decode)
            }
        }
    }
}

// Normalization
//------------------------------------------------------------------------------

/// Smallest permitted output side; anything below stops being comfortably
/// scannable on screens.
pub const MIN_TARGET_SIDE: u32 = 300;

/// Backgrounds whose smaller dimension exceeds this get center-cropped square
/// before resizing; smaller ones are squashed by the exact resize instead.
const CROP_THRESHOLD: u32 = 500;

/// Output side length: the explicit override if given, otherwise the
/// background's smaller dimension floored at [`MIN_TARGET_SIDE`].
pub fn target_side(img: &DynamicImage, explicit: Option<u32>) -> u32 {
    explicit.unwrap_or_else(|| MIN_TARGET_SIDE.max(img.width().min(img.height())))
}

/// Squares the background off at exactly `side`x`side`.
pub fn normalize(img: DynamicImage, side: u32) -> DynamicImage {
    let squared =
        if img.width().min(img.height()) > CROP_THRESHOLD { center_crop(&img) } else { img };
    squared.resize_exact(side, side, FilterType::Lanczos3)
}

fn center_crop(img: &DynamicImage) -> DynamicImage {
    let (w, h) = (img.width(), img.height());
    let m = w.min(h);
    img.crop_imm((w - m) / 2, (h - m) / 2, m, m)
}

#[cfg(test)]
mod background_tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    use image::{DynamicImage, Rgb, RgbImage};
    use test_case::test_case;

    use super::{center_crop, normalize, target_side, BackgroundSource};
    use crate::common::error::WeaveError;

    // Encodes the source x coordinate into red/green and y into blue
    fn marker(w: u32, h: u32) -> DynamicImage {
        let img = RgbImage::from_fn(w, h, |x, y| {
            Rgb([(x % 256) as u8, (x / 256) as u8, (y % 256) as u8])
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test_case("https://example.com/bg.png", true; "https url")]
    #[test_case("http://example.com/bg.png", true; "http url")]
    #[test_case("photos/bg.png", false; "relative path")]
    #[test_case("/tmp/bg.jpg", false; "absolute path")]
    fn test_source_sniffing(raw: &str, remote: bool) {
        let source = BackgroundSource::from(raw);
        assert_eq!(matches!(source, BackgroundSource::Url(_)), remote);
        assert_eq!(source.to_string(), raw);
    }

    #[test_case(600, 400, None, 400; "derived from smaller dimension")]
    #[test_case(200, 900, None, 300; "derived hits the floor")]
    #[test_case(300, 300, None, 300; "derived at the floor exactly")]
    #[test_case(600, 400, Some(512), 512; "explicit override wins")]
    fn test_target_side(w: u32, h: u32, explicit: Option<u32>, expected: u32) {
        let img = DynamicImage::new_rgb8(w, h);
        assert_eq!(target_side(&img, explicit), expected);
    }

    #[test_case(800, 600, 100, 0; "wide even offset")]
    #[test_case(801, 600, 100, 0; "wide odd offset floors")]
    #[test_case(600, 1000, 0, 200; "tall crops vertically")]
    fn test_center_crop_box(w: u32, h: u32, x_off: u32, y_off: u32) {
        let img = marker(w, h);
        let cropped = center_crop(&img);
        let m = w.min(h);

        assert_eq!(cropped.width(), m);
        assert_eq!(cropped.height(), m);
        let rgb = cropped.to_rgb8();
        let expected = Rgb([(x_off % 256) as u8, (x_off / 256) as u8, (y_off % 256) as u8]);
        assert_eq!(*rgb.get_pixel(0, 0), expected);
        let (lx, ly) = (x_off + m - 1, y_off + m - 1);
        let expected = Rgb([(lx % 256) as u8, (lx / 256) as u8, (ly % 256) as u8]);
        assert_eq!(*rgb.get_pixel(m - 1, m - 1), expected);
    }

    #[test_case(400, 300, 300; "small image squashed up to square")]
    #[test_case(800, 600, 600; "large image cropped then kept")]
    #[test_case(2000, 1200, 500; "large image cropped then shrunk")]
    fn test_normalize_dimensions(w: u32, h: u32, side: u32) {
        let out = normalize(DynamicImage::new_rgb8(w, h), side);
        assert_eq!((out.width(), out.height()), (side, side));
    }

    #[test]
    fn test_normalize_squashes_below_crop_threshold() {
        // 600x500 stays uncropped: a crop would slice off the left stripe, a
        // squash keeps it at the edge
        let img = RgbImage::from_fn(600, 500, |x, _| {
            if x < 20 {
                Rgb([255, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        let out = normalize(DynamicImage::ImageRgb8(img), 500).to_rgb8();

        let px = out.get_pixel(0, 250);
        assert!(px[0] > 200 && px[1] < 50 && px[2] < 50, "left stripe lost: {px:?}");
    }

    // Answers a single request on a loopback port, then shuts down
    fn serve_once(status_line: &'static str, body: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut req = Vec::new();
            let mut chunk = [0u8; 512];
            while !req.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => req.extend_from_slice(&chunk[..n]),
                }
            }
            let head = format!(
                "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            stream.write_all(head.as_bytes()).unwrap();
            stream.write_all(body).unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn test_load_missing_path_is_decode_error() {
        let source = BackgroundSource::from("definitely/not/here.png");
        assert!(matches!(source.load(), Err(WeaveError::Decode(_))));
    }

    #[test]
    fn test_load_http_failure_status_is_fetch_error() {
        let url = serve_once("404 Not Found", b"no such background");
        let source = BackgroundSource::from(url);
        assert!(matches!(source.load(), Err(WeaveError::Fetch(_))));
    }

    #[test]
    fn test_load_refused_connection_is_fetch_error() {
        // Bind to grab a free port, drop so nothing listens on it
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let source = BackgroundSource::from(format!("http://{addr}"));
        assert!(matches!(source.load(), Err(WeaveError::Fetch(_))));
    }

    #[test]
    fn test_load_http_non_image_body_is_decode_error() {
        let url = serve_once("200 OK", b"<html>definitely not an image</html>");
        let source = BackgroundSource::from(url);
        assert!(matches!(source.load(), Err(WeaveError::Decode(_))));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bg.png");
        marker(64, 48).save(&path).unwrap();

        let source = BackgroundSource::from(path.to_str().unwrap());
        let img = source.load().unwrap();
        assert_eq!((img.width(), img.height()), (64, 48));
    }
}
