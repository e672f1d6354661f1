use namedq::known_drivers;

pub fn run() {
    print!("{}", render());
}

fn render() -> String {
    let mut out = String::new();
    for (driver, style) in known_drivers() {
        out.push_str(&format!("{driver:<18} {style}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_driver() {
        let out = render();
        assert_eq!(out.lines().count(), known_drivers().count());
        assert!(out.lines().any(|l| l.starts_with("sqlserver ") && l.ends_with(" at")));
        assert!(out.lines().any(|l| l.starts_with("postgres ") && l.ends_with(" dollar")));
    }
}
