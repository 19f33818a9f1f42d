use plant_pulse::app::PulseApp;

fn main() -> anyhow::Result<()> {
    PulseApp::run()
}
