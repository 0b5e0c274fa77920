#[cfg(test)]
mod platform_generation_tests {
    use std::collections::HashSet;
    use std::fs;
    use std::process::Command;

    use tempfile::tempdir;

    use wrenchprep::config::PlatformTemplate;
    use wrenchprep::platform::{build_platform, to_xml, write_platform, XmlStyle};

    fn xml_for(nodes: usize) -> String {
        let platform = build_platform(nodes, &PlatformTemplate::default()).unwrap();
        to_xml(&platform, &XmlStyle::default()).unwrap()
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    /// Pull the value of `attr="..."` out of every line containing `tag`
    fn attribute_values(xml: &str, tag: &str, attr: &str) -> Vec<String> {
        let key = format!("{}=\"", attr);
        xml.lines()
            .filter(|line| line.trim_start().starts_with(tag))
            .filter_map(|line| {
                let start = line.find(&key)? + key.len();
                let end = line[start..].find('"')? + start;
                Some(line[start..end].to_string())
            })
            .collect()
    }

    #[test]
    fn test_element_counts_scale_with_nodes() {
        for n in [1usize, 2, 5, 32] {
            let xml = xml_for(n);
            assert_eq!(count(&xml, "<host id=\"ComputeHost"), n);
            assert_eq!(count(&xml, "<host id=\"StorageHost"), n);
            assert_eq!(count(&xml, "<host id=\"UserHost\""), 1);
            assert_eq!(count(&xml, "<host id=\"CloudHeadHost\""), 1);
            assert_eq!(count(&xml, "<host id=\"CloudHost\""), 1);
            assert_eq!(count(&xml, "<link id="), 1);
            assert_eq!(count(&xml, "<route "), 4 * n + 2);
        }
    }

    #[test]
    fn test_route_endpoints_are_declared_hosts() {
        let xml = xml_for(6);
        let hosts: HashSet<String> = attribute_values(&xml, "<host ", "id").into_iter().collect();
        let sources = attribute_values(&xml, "<route ", "src");
        let destinations = attribute_values(&xml, "<route ", "dst");

        assert_eq!(sources.len(), 26);
        for id in sources.iter().chain(destinations.iter()) {
            assert!(hosts.contains(id), "route references unknown host {}", id);
        }
        for link in attribute_values(&xml, "<link_ctn ", "id") {
            assert_eq!(link, "network_link");
        }
    }

    #[test]
    fn test_preamble_and_blank_lines() {
        let xml = xml_for(2);
        let lines: Vec<&str> = xml.lines().collect();
        assert_eq!(lines[0], "<?xml version='1.0'?>");
        assert_eq!(lines[1], "<!DOCTYPE platform SYSTEM \"https://simgrid.org/simgrid.dtd\">");
        assert_eq!(lines[2], "<platform version=\"4.1\">");
        assert_eq!(*lines.last().unwrap(), "</platform>");

        for (i, line) in lines.iter().enumerate() {
            if line.trim() == "</host>" || line.trim() == "</zone>" {
                assert_eq!(lines[i + 1], "", "no blank line after line {}", i);
            }
        }
        // blank lines appear nowhere else
        let blanks = lines.iter().filter(|l| l.is_empty()).count();
        assert_eq!(blanks, count(&xml, "</host>") + 1);
    }

    #[test]
    fn test_write_platform_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("platform.xml");
        let platform = build_platform(3, &PlatformTemplate::default()).unwrap();

        write_platform(&platform, &XmlStyle::default(), &path).unwrap();
        write_platform(&platform, &XmlStyle::default(), &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), to_xml(&platform, &XmlStyle::default()).unwrap());
    }

    #[test]
    fn test_cli_writes_platform() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("platform.xml");

        let status = Command::new(env!("CARGO_BIN_EXE_platform-gen"))
            .args(["--filename", path.to_str().unwrap(), "--nodes", "2", "--log-level", "warn"])
            .status()
            .unwrap();

        assert!(status.success());
        assert_eq!(fs::read_to_string(&path).unwrap(), xml_for(2));
    }

    #[test]
    fn test_cli_rejects_invalid_node_counts() {
        let dir = tempdir().unwrap();
        for nodes in ["0", "-3"] {
            let path = dir.path().join(format!("platform_{}.xml", nodes));
            let status = Command::new(env!("CARGO_BIN_EXE_platform-gen"))
                .args(["--filename", path.to_str().unwrap(), "--nodes", nodes])
                .status()
                .unwrap();

            assert!(!status.success(), "nodes={} should fail", nodes);
            assert!(!path.exists(), "no output expected for nodes={}", nodes);
        }
    }

    #[test]
    fn test_cli_fails_when_output_cannot_be_written() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("platform.xml");

        let output = Command::new(env!("CARGO_BIN_EXE_platform-gen"))
            .args(["--filename", path.to_str().unwrap(), "--nodes", "2"])
            .output()
            .unwrap();

        assert!(!output.status.success());
        assert!(!path.exists());
        assert!(String::from_utf8_lossy(&output.stderr).contains("platform.xml"));
    }

    #[test]
    fn test_cli_uses_template() {
        let dir = tempdir().unwrap();
        let template = dir.path().join("template.yaml");
        let path = dir.path().join("platform.xml");
        fs::write(
            &template,
            "link:\n  id: \"wan\"\n  bandwidth: \"10GBps\"\n  latency: \"20us\"\n",
        )
        .unwrap();

        let status = Command::new(env!("CARGO_BIN_EXE_platform-gen"))
            .args([
                "--filename",
                path.to_str().unwrap(),
                "--nodes",
                "1",
                "--template",
                template.to_str().unwrap(),
            ])
            .status()
            .unwrap();

        assert!(status.success());
        let xml = fs::read_to_string(&path).unwrap();
        assert!(xml.contains("<link id=\"wan\" bandwidth=\"10GBps\" latency=\"20us\"/>"));
        assert_eq!(count(&xml, "<link_ctn id=\"wan\"/>"), 6);
    }

    #[test]
    fn test_cli_rejects_invalid_template() {
        let dir = tempdir().unwrap();
        let template = dir.path().join("template.yaml");
        let path = dir.path().join("platform.xml");
        fs::write(&template, "compute:\n  speed: \"fast\"\n  cores: 4\n").unwrap();

        let status = Command::new(env!("CARGO_BIN_EXE_platform-gen"))
            .args([
                "--filename",
                path.to_str().unwrap(),
                "--nodes",
                "1",
                "--template",
                template.to_str().unwrap(),
            ])
            .status()
            .unwrap();

        assert!(!status.success());
        assert!(!path.exists());
    }
}
