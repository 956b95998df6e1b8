/// The two-item list used throughout the query scenarios.
pub const LIST: &str = "<ul><li>a</li><li>b</li></ul>";

/// A small results table with a header row, links and missing attributes.
pub const TABLE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Results</title></head>
<body>
  <table id="results">
    <tr><th>Name</th><th>Link</th></tr>
    <tr><td>First</td><td><a href="/first" title="one">go</a></td></tr>
    <tr><td>Second</td><td><a href="/second">go</a></td></tr>
    <tr><td>Third</td><td>none</td></tr>
  </table>
</body>
</html>"#;
