use crate::types::Credentials;

/// Path used to tell "wrong credentials" apart from "wrong path".
pub const CREDENTIAL_CHECK_PATH: &str = "/DUMMY_TEST_PATH_123456789";

/// Stream paths used by common camera and NVR vendors.
pub const DEFAULT_PATHS: &[&str] = &[
    // Root and basic paths
    "/",
    "/live",
    "/h264",
    "/mpeg4",
    "/main",
    "/media",
    "/stream",
    // Live stream variations
    "/live/main",
    "/live/sub",
    "/live/ch0",
    "/live/ch1",
    "/live/ch2",
    "/live/ch3",
    "/live/ch00_0",
    "/live/ch01_0",
    "/live/ch02_0",
    "/live/ch03_0",
    // H264 variations
    "/h264/ch01/main/av_stream",
    "/h264/media.amp",
    "/h264/ch1/main",
    "/h264/ch1/sub",
    // MPEG4 variations
    "/mpeg4/media.amp",
    "/mpeg4/1/media.amp",
    "/mpeg4cif",
    "/mpeg4unicast",
    // Channel variations
    "/ch0",
    "/ch1",
    "/ch2",
    "/ch3",
    "/cam0",
    "/cam1",
    "/cam2",
    "/cam3",
    "/cam0_0",
    "/cam1_0",
    "/cam2_0",
    "/cam3_0",
    // Streaming paths
    "/Streaming/Channels/1",
    "/Streaming/Unicast/channels/101",
    // ONVIF style paths
    "/cam/realmonitor?channel=0&subtype=0&unicast=true&proto=Onvif",
    "/cam/realmonitor?channel=1&subtype=0&unicast=true&proto=Onvif",
    "/cam/realmonitor?channel=2&subtype=0&unicast=true&proto=Onvif",
    "/cam/realmonitor?channel=3&subtype=0&unicast=true&proto=Onvif",
    // Credential templated paths
    "/0/1:1/main",
    "/0/usrnm:pwd/main",
    "/0/video1",
    "/user=admin&password=&channel=1&stream=0.sdp?",
    "/user=admin&password=&channel=2&stream=0.sdp?",
    "/user=admin&password=&channel=1&stream=0.sdp?real_stream",
    "/user=admin&password=&channel=2&stream=0.sdp?real_stream",
    // Additional formats
    "/av0_0",
    "/av0_1",
    "/video1",
    "/video.mp4",
    "/video1+audio1",
    "/video.pro1",
    "/video.pro2",
    "/video.pro3",
    "/MediaInput/h264",
    "/MediaInput/mpeg4",
    "/axis-media/media.amp",
    "/11",
    "/12",
    "/1",
    "/1.amp",
    "/stream1",
    "/bystreamnum/0",
    "/profile1",
    "/media/video1",
    "/ucast/11",
    // Settings paths
    "/StreamingSetting?version=1.0&action=getRTSPStream&ChannelID=1&ChannelName=Channel1",
];

const USER_PASS_TOKEN: &str = "usrnm:pwd";
const QUERY_CREDS_TOKEN: &str = "user=admin&password=";

pub fn default_paths() -> Vec<String> {
    DEFAULT_PATHS.iter().map(|p| p.to_string()).collect()
}

/// Substitute the job's credentials into templated vendor paths.
/// Paths without placeholders are returned unchanged.
pub fn replace_creds(path: &str, credentials: &Credentials) -> String {
    let mut processed = path.replace(
        USER_PASS_TOKEN,
        &format!("{}:{}", credentials.username, credentials.password),
    );
    if processed.contains(QUERY_CREDS_TOKEN) {
        processed = processed.replace(
            QUERY_CREDS_TOKEN,
            &format!("user={}&password={}", credentials.username, credentials.password),
        );
    }
    processed
}

pub fn is_root(path: &str) -> bool {
    path == "/"
}
