mod command;
mod recording;

pub use command::{CommandDevice, parse_voice_list, words_per_minute};
pub use recording::{DeviceCall, RecordingDevice};
