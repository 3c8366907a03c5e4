fn main() {
    #[cfg(windows)]
    {
        let mut res = winres::WindowsResource::new();
        if let Err(e) = res.compile() {
            println!("cargo:warning=failed to embed Windows resources: {}", e);
        }
    }
}
