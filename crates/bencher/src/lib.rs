use cookie::Cookie;

/// Name of the cookie holding the length-bin payload in every fixture.
const COOKIE_NAME: &str = "wuach";

#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    group: TestGroup,
    file: TestFile,
}

impl TestCase {
    pub fn new(name: &'static str, group: TestGroup, file: TestFile) -> Self {
        Self { name, group, file }
    }

    pub fn small(name: &'static str, file: TestFile) -> Self {
        Self::new(name, TestGroup::Small, file)
    }

    pub fn large(name: &'static str, file: TestFile) -> Self {
        Self::new(name, TestGroup::Large, file)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> TestGroup {
        self.group
    }

    pub fn file(&self) -> &TestFile {
        &self.file
    }
}

/// A cookie header fixture, stored under `resources/cookie`.
#[derive(Debug, Copy, Clone)]
pub struct TestFile {
    file_name: &'static str,
    cookie_header: &'static str,
}

impl TestFile {
    pub const fn new(file_name: &'static str, cookie_header: &'static str) -> Self {
        Self { file_name, cookie_header }
    }

    pub fn cookie_header(&self) -> &'static str {
        self.cookie_header
    }

    /// The Base64 value of the `wuach` cookie inside the header, empty if it's absent.
    pub fn cookie_value(&self) -> &'static str {
        Cookie::split_parse(self.cookie_header)
            .filter_map(Result::ok)
            .find(|cookie| cookie.name() == COOKIE_NAME)
            .and_then(|cookie| cookie.value_raw())
            .unwrap_or_default()
    }

    pub fn file_name(&self) -> &'static str {
        self.file_name
    }
}

#[derive(Clone, Copy, Debug)]
pub enum TestGroup {
    Small,
    Large,
}
