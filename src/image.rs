/// Extensions a viewer can show as an image comparison
const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpeg", "jpg", "webp", "bmp", "gif"];

/// Whether `name` looks like an image file.
///
/// Only the extension after the last `.` of the final path component counts,
/// compared case-sensitively. A name needs a non-empty base before that dot,
/// so `.gif` is not an image.
///
/// # Examples
///
/// ```
/// use patch_groups::is_image_file;
///
/// assert!(is_image_file("docs/foo.bar.jpeg"));
/// assert!(!is_image_file(".gif"));
/// assert!(!is_image_file("not a gif.gif.txt"));
/// ```
pub fn is_image_file(name: &str) -> bool {
    let file_name = name.rsplit_once('/').map_or(name, |(_, file)| file);
    match file_name.rsplit_once('.') {
        Some((base, extension)) if !base.is_empty() => IMAGE_EXTENSIONS.contains(&extension),
        _ => false,
    }
}
