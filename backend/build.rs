use std::fs;
use std::path::Path;

const PLACEHOLDER_INDEX: &str = "<!doctype html>
<html lang=\"en\">
<head><meta charset=\"utf-8\"><title>ISP Admin</title></head>
<body><div id=\"app\">Admin UI bundle not built. The API is available under /api.</div></body>
</html>
";

fn main() {
    let out_dir = Path::new("static");
    let embedded_dir = out_dir.join("dist");
    let dist_dir = Path::new("../admin-ui/dist");

    if dist_dir.exists() {
        let _ = fs::remove_dir_all(out_dir);
        fs::create_dir_all(out_dir).unwrap();
        fs_extra::dir::copy(
            dist_dir,
            out_dir,
            &fs_extra::dir::CopyOptions::new().overwrite(true).copy_inside(true),
        )
            .unwrap();
    } else if !embedded_dir.join("index.html").exists() {
        fs::create_dir_all(&embedded_dir).unwrap();
        fs::write(embedded_dir.join("index.html"), PLACEHOLDER_INDEX).unwrap();
    }
    println!("cargo:rerun-if-changed=../admin-ui/dist");
}
