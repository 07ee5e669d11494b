use std::process::Command;

#[test]
fn can_start_and_stop_server() {
    let server_executable = env!("CARGO_BIN_EXE_homepage");
    println!("Running `homepage` {server_executable}");
    let mut process = Command::new(server_executable)
        .env("OPENWEATHER_API_KEY", "test-key")
        .spawn()
        .expect("Could not start server");

    Command::new("kill")
        .args(["-s", "TERM", &process.id().to_string()])
        .status()
        .expect("Failed to send signal");

    process.wait().expect("server failed to stop");
}
