use rand::Rng;

const FILENAME_STEM_LEN: usize = 10;
const FILENAME_EXT: &str = ".mp3";

/// Length of every name returned by [`random_filename`].
pub const FILENAME_LEN: usize = FILENAME_STEM_LEN + FILENAME_EXT.len();

/// Placeholder audio filename, ten random lowercase letters plus `.mp3`.
pub fn random_filename() -> String {
    let mut rng = rand::rng();
    let mut name: String = (0..FILENAME_STEM_LEN)
        .map(|_| rng.random_range(b'a'..=b'z') as char)
        .collect();
    name.push_str(FILENAME_EXT);
    name
}
