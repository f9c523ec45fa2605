//! XML-Import des Marker-Deskriptors.
//!
//! Format:
//! ```xml
//! <markers>
//!   <marker id="..." name="..." x="12" y="34" class="PROTEIN">
//!     <notes><![CDATA[ ...HTML... ]]></notes>
//!   </marker>
//! </markers>
//! ```

pub mod parser;

pub use parser::{parse_marker_descriptor, DescriptorError};
