use std::cmp;
use std::ffi;

use gl;
use gl::types::*;

use crate::errors::*;

use super::super::Limits;

/// Describes the OpenGL context profile.
#[derive(Debug, Copy, Clone)]
pub enum Profile {
    /// The context uses only future-compatible functions and definitions.
    Core,
    /// The context includes all immediate mode functions and definitions.
    Compatibility,
}

/// Describes a version.
///
/// A version can only be compared to another version if they belong to the same API.
/// For example, both `Version::GL(3, 0) >= Version::ES(3, 0)` and `Version::ES(3, 0) >=
/// Version::GL(3, 0)` return `false`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Version {
    /// Regular OpenGL.
    GL(u8, u8),
    /// OpenGL embedded system.
    ES(u8, u8),
}

impl PartialOrd for Version {
    #[inline]
    fn partial_cmp(&self, other: &Version) -> Option<cmp::Ordering> {
        let (es1, major1, minor1) = match *self {
            Version::GL(major, minor) => (false, major, minor),
            Version::ES(major, minor) => (true, major, minor),
        };

        let (es2, major2, minor2) = match *other {
            Version::GL(major, minor) => (false, major, minor),
            Version::ES(major, minor) => (true, major, minor),
        };

        if es1 != es2 {
            None
        } else {
            match major1.cmp(&major2) {
                cmp::Ordering::Equal => Some(minor1.cmp(&minor2)),
                v => Some(v),
            }
        }
    }
}

impl Version {
    /// Parses a `GL_VERSION` string, e.g. `4.1 Metal - 76.3` or `OpenGL ES 3.2 v1.r26p0`.
    pub fn from_desc(desc: &str) -> Result<Version> {
        let malformed = || Error::Backend(format!("[GL] version `{}` is malformed", desc));

        let (es, rest) = if desc.starts_with("OpenGL ES ") {
            (true, &desc[10..])
        } else if desc.starts_with("OpenGL ES-") {
            (true, &desc[13..])
        } else {
            (false, desc)
        };

        let rest = rest.split(' ').next().ok_or_else(malformed)?;
        let mut iter = rest.split('.');
        let major = iter.next().and_then(|v| v.parse().ok()).ok_or_else(malformed)?;
        let minor = iter.next().and_then(|v| v.parse().ok()).ok_or_else(malformed)?;

        if es {
            Ok(Version::ES(major, minor))
        } else {
            Ok(Version::GL(major, minor))
        }
    }

    /// Obtains the OpenGL version of the current context using the loaded functions.
    ///
    /// # Unsafe
    ///
    /// You must ensure that the functions belong to the current context, otherwise you will get
    /// an undefined behavior.
    pub unsafe fn parse() -> Result<Version> {
        Version::from_desc(&parse_str(gl::VERSION)?)
    }
}

macro_rules! extensions {
    ($($string:expr => $field:ident,)+) => {
        /// Contains data about the list of extensions.
        #[derive(Debug, Clone, Copy)]
        pub struct Extensions {
            $(
                pub $field: bool,
            )+
        }

        impl Extensions {
            /// Returns the list of extensions supported by the context.
            ///
            /// *Safety*: the OpenGL context must be current in the thread.
            pub unsafe fn parse(version: Version) -> Result<Extensions> {
                let strings: Vec<String> = if version >= Version::GL(3, 0) || version >= Version::ES(3, 0) {
                    let mut num_extensions = 0;
                    gl::GetIntegerv(gl::NUM_EXTENSIONS, &mut num_extensions);
                    (0 .. num_extensions).filter_map(|i| {
                        let ext = gl::GetStringi(gl::EXTENSIONS, i as GLuint);
                        if ext.is_null() {
                            None
                        } else {
                            Some(ffi::CStr::from_ptr(ext as *const _).to_string_lossy().into_owned())
                        }
                    }).collect()
                } else {
                    parse_str(gl::EXTENSIONS)?.split(' ').map(|e| e.to_owned()).collect()
                };

                let mut extensions = Extensions {
                    $(
                        $field: false,
                    )+
                };

                for extension in strings {
                    match &extension[..] {
                        $(
                            $string => extensions.$field = true,
                        )+
                        _ => ()
                    }
                }

                Ok(extensions)
            }
        }
    }
}

extensions! {
    "GL_ARB_shader_objects" => gl_arb_shader_objects,
    "GL_ARB_vertex_shader" => gl_arb_vertex_shader,
    "GL_ARB_fragment_shader" => gl_arb_fragment_shader,
    "GL_ARB_vertex_buffer_object" => gl_arb_vertex_buffer_object,
    "GL_ARB_vertex_array_object" => gl_arb_vertex_array_object,
    "GL_APPLE_vertex_array_object" => gl_apple_vertex_array_object,
    "GL_ARB_tessellation_shader" => gl_arb_tessellation_shader,
    "GL_ARB_geometry_shader4" => gl_arb_geometry_shader4,
    "GL_ARB_compute_shader" => gl_arb_compute_shader,
}

/// Represents the capabilities of the context.
///
/// Contrary to the state, these values never change.
#[derive(Debug)]
pub struct Capabilities {
    /// Returns a version or release number. Vendor-specific information may follow the version
    /// number.
    pub version: Version,

    /// The company responsible for this GL implementation.
    pub vendor: String,

    /// The list of OpenGL extensions support by this implementation.
    pub extensions: Extensions,

    /// The name of the renderer. This name is typically specific to a particular
    /// configuration of a hardware platform.
    pub renderer: String,

    /// The OpenGL context profile if available.
    ///
    /// The context profile is available from OpenGL 3.2 onwards. `None` if not supported.
    pub profile: Option<Profile>,

    /// The context is in debug mode, which may have additional error and performance issue
    /// reporting functionality.
    pub debug: bool,

    /// Maximum number of control points of one patch, 0 without tessellation.
    pub max_patch_vertices: u32,

    /// Maximum tessellation level a control stage may emit, 0 without tessellation.
    pub max_tess_gen_level: u32,
}

impl Capabilities {
    pub unsafe fn parse() -> Result<Capabilities> {
        let version = Version::parse()?;
        let extensions = Extensions::parse(version)?;

        let debug = if version >= Version::GL(3, 0) {
            let mut val = 0;
            gl::GetIntegerv(gl::CONTEXT_FLAGS, &mut val);
            (val as GLenum & gl::CONTEXT_FLAG_DEBUG_BIT) != 0
        } else {
            false
        };

        let mut caps = Capabilities {
            version,
            extensions,
            vendor: parse_str(gl::VENDOR)?,
            renderer: parse_str(gl::RENDERER)?,
            profile: Capabilities::parse_profile(version),
            debug,
            max_patch_vertices: 0,
            max_tess_gen_level: 0,
        };

        if caps.has_tessellation() {
            caps.max_patch_vertices = parse_u32(gl::MAX_PATCH_VERTICES);
            caps.max_tess_gen_level = parse_u32(gl::MAX_TESS_GEN_LEVEL);
        }

        Ok(caps)
    }

    /// The limits programs are checked against.
    pub fn limits(&self) -> Limits {
        Limits {
            max_patch_vertices: Some(self.max_patch_vertices),
            max_tessellation_level: Some(self.max_tess_gen_level as f32),
        }
    }

    pub fn has_tessellation(&self) -> bool {
        self.version >= Version::GL(4, 0)
            || self.version >= Version::ES(3, 2)
            || self.extensions.gl_arb_tessellation_shader
    }

    pub fn has_geometry_shader(&self) -> bool {
        self.version >= Version::GL(3, 2)
            || self.version >= Version::ES(3, 2)
            || self.extensions.gl_arb_geometry_shader4
    }

    pub fn has_compute_shader(&self) -> bool {
        self.version >= Version::GL(4, 3)
            || self.version >= Version::ES(3, 1)
            || self.extensions.gl_arb_compute_shader
    }

    #[inline]
    unsafe fn parse_profile(version: Version) -> Option<Profile> {
        if version >= Version::GL(3, 2) {
            let mut val = 0;
            gl::GetIntegerv(gl::CONTEXT_PROFILE_MASK, &mut val);
            let val = val as GLenum;
            if (val & gl::CONTEXT_COMPATIBILITY_PROFILE_BIT) != 0 {
                Some(Profile::Compatibility)
            } else if (val & gl::CONTEXT_CORE_PROFILE_BIT) != 0 {
                Some(Profile::Core)
            } else {
                None
            }
        } else {
            None
        }
    }
}

#[inline]
unsafe fn parse_str(id: GLenum) -> Result<String> {
    let s = gl::GetString(id);
    if s.is_null() {
        return Err(Error::Backend(format!("[GL] String of {} is null.", id)));
    }

    String::from_utf8(ffi::CStr::from_ptr(s as *const _).to_bytes().to_vec())
        .map_err(|_| Error::Backend(format!("[GL] String of {} is unformaled.", id)))
}

#[inline]
unsafe fn parse_u32(id: GLenum) -> u32 {
    let mut val = 0;
    gl::GetIntegerv(id, &mut val);
    val.max(0) as u32
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn version() {
        assert_eq!(Version::from_desc("4.1 Metal - 76.3").unwrap(), Version::GL(4, 1));
        assert_eq!(
            Version::from_desc("OpenGL ES 3.2 v1.r26p0").unwrap(),
            Version::ES(3, 2)
        );
        assert!(Version::from_desc("OpenGL").is_err());

        assert!(Version::GL(4, 0) > Version::GL(3, 3));
        assert!(!(Version::GL(4, 0) >= Version::ES(3, 0)));
    }
}
