fn main() {
    // Export the ESP-IDF link arguments only when building the firmware
    // image; host test builds have no IDF environment.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
