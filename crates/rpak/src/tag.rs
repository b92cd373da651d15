//! Tag numbers and their names.
//!
//! Constants at the top level are for the metadata header. [`signature`] has the ones used in the
//! signature header, which reuses some of the same numbers for different things.

/// Defines tag constants along with a lookup from number to name.
macro_rules! tags {
	($($name:ident = $value:literal => $rpm:literal),* $(,)?) => {
		$(
			#[doc = concat!("`", $rpm, "`")]
			pub const $name: i32 = $value;
		)*

		/// Look up the symbolic name of a tag.
		pub fn name(tag: i32) -> Option<&'static str> {
			match tag {
				$($value => Some($rpm),)*
				_ => None,
			}
		}

		/// All known tags, in ascending order.
		pub const ALL: &[i32] = &[$($value),*];
	};
}

tags! {
	HEADERIMAGE = 61 => "RPMTAG_HEADERIMAGE",
	HEADERSIGNATURES = 62 => "RPMTAG_HEADERSIGNATURES",
	HEADERIMMUTABLE = 63 => "RPMTAG_HEADERIMMUTABLE",
	HEADERREGIONS = 64 => "RPMTAG_HEADERREGIONS",
	HEADERI18NTABLE = 100 => "RPMTAG_HEADERI18NTABLE",
	NAME = 1000 => "RPMTAG_NAME",
	VERSION = 1001 => "RPMTAG_VERSION",
	RELEASE = 1002 => "RPMTAG_RELEASE",
	EPOCH = 1003 => "RPMTAG_EPOCH",
	SUMMARY = 1004 => "RPMTAG_SUMMARY",
	DESCRIPTION = 1005 => "RPMTAG_DESCRIPTION",
	BUILDTIME = 1006 => "RPMTAG_BUILDTIME",
	BUILDHOST = 1007 => "RPMTAG_BUILDHOST",
	INSTALLTIME = 1008 => "RPMTAG_INSTALLTIME",
	SIZE = 1009 => "RPMTAG_SIZE",
	DISTRIBUTION = 1010 => "RPMTAG_DISTRIBUTION",
	VENDOR = 1011 => "RPMTAG_VENDOR",
	GIF = 1012 => "RPMTAG_GIF",
	XPM = 1013 => "RPMTAG_XPM",
	LICENSE = 1014 => "RPMTAG_LICENSE",
	PACKAGER = 1015 => "RPMTAG_PACKAGER",
	GROUP = 1016 => "RPMTAG_GROUP",
	CHANGELOG = 1017 => "RPMTAG_CHANGELOG",
	SOURCE = 1018 => "RPMTAG_SOURCE",
	PATCH = 1019 => "RPMTAG_PATCH",
	URL = 1020 => "RPMTAG_URL",
	OS = 1021 => "RPMTAG_OS",
	ARCH = 1022 => "RPMTAG_ARCH",
	PREIN = 1023 => "RPMTAG_PREIN",
	POSTIN = 1024 => "RPMTAG_POSTIN",
	PREUN = 1025 => "RPMTAG_PREUN",
	POSTUN = 1026 => "RPMTAG_POSTUN",
	OLDFILENAMES = 1027 => "RPMTAG_OLDFILENAMES",
	FILESIZES = 1028 => "RPMTAG_FILESIZES",
	FILESTATES = 1029 => "RPMTAG_FILESTATES",
	FILEMODES = 1030 => "RPMTAG_FILEMODES",
	FILEUIDS = 1031 => "RPMTAG_FILEUIDS",
	FILEGIDS = 1032 => "RPMTAG_FILEGIDS",
	FILERDEVS = 1033 => "RPMTAG_FILERDEVS",
	FILEMTIMES = 1034 => "RPMTAG_FILEMTIMES",
	FILEDIGESTS = 1035 => "RPMTAG_FILEDIGESTS",
	FILELINKTOS = 1036 => "RPMTAG_FILELINKTOS",
	FILEFLAGS = 1037 => "RPMTAG_FILEFLAGS",
	ROOT = 1038 => "RPMTAG_ROOT",
	FILEUSERNAME = 1039 => "RPMTAG_FILEUSERNAME",
	FILEGROUPNAME = 1040 => "RPMTAG_FILEGROUPNAME",
	EXCLUDE = 1041 => "RPMTAG_EXCLUDE",
	EXCLUSIVE = 1042 => "RPMTAG_EXCLUSIVE",
	ICON = 1043 => "RPMTAG_ICON",
	SOURCERPM = 1044 => "RPMTAG_SOURCERPM",
	FILEVERIFYFLAGS = 1045 => "RPMTAG_FILEVERIFYFLAGS",
	ARCHIVESIZE = 1046 => "RPMTAG_ARCHIVESIZE",
	PROVIDENAME = 1047 => "RPMTAG_PROVIDENAME",
	REQUIREFLAGS = 1048 => "RPMTAG_REQUIREFLAGS",
	REQUIRENAME = 1049 => "RPMTAG_REQUIRENAME",
	REQUIREVERSION = 1050 => "RPMTAG_REQUIREVERSION",
	NOSOURCE = 1051 => "RPMTAG_NOSOURCE",
	NOPATCH = 1052 => "RPMTAG_NOPATCH",
	CONFLICTFLAGS = 1053 => "RPMTAG_CONFLICTFLAGS",
	CONFLICTNAME = 1054 => "RPMTAG_CONFLICTNAME",
	CONFLICTVERSION = 1055 => "RPMTAG_CONFLICTVERSION",
	DEFAULTPREFIX = 1056 => "RPMTAG_DEFAULTPREFIX",
	BUILDROOT = 1057 => "RPMTAG_BUILDROOT",
	INSTALLPREFIX = 1058 => "RPMTAG_INSTALLPREFIX",
	EXCLUDEARCH = 1059 => "RPMTAG_EXCLUDEARCH",
	EXCLUDEOS = 1060 => "RPMTAG_EXCLUDEOS",
	EXCLUSIVEARCH = 1061 => "RPMTAG_EXCLUSIVEARCH",
	EXCLUSIVEOS = 1062 => "RPMTAG_EXCLUSIVEOS",
	AUTOREQPROV = 1063 => "RPMTAG_AUTOREQPROV",
	RPMVERSION = 1064 => "RPMTAG_RPMVERSION",
	TRIGGERSCRIPTS = 1065 => "RPMTAG_TRIGGERSCRIPTS",
	TRIGGERNAME = 1066 => "RPMTAG_TRIGGERNAME",
	TRIGGERVERSION = 1067 => "RPMTAG_TRIGGERVERSION",
	TRIGGERFLAGS = 1068 => "RPMTAG_TRIGGERFLAGS",
	TRIGGERINDEX = 1069 => "RPMTAG_TRIGGERINDEX",
	VERIFYSCRIPT = 1079 => "RPMTAG_VERIFYSCRIPT",
	CHANGELOGTIME = 1080 => "RPMTAG_CHANGELOGTIME",
	CHANGELOGNAME = 1081 => "RPMTAG_CHANGELOGNAME",
	CHANGELOGTEXT = 1082 => "RPMTAG_CHANGELOGTEXT",
	BROKENMD5 = 1083 => "RPMTAG_BROKENMD5",
	PREREQ = 1084 => "RPMTAG_PREREQ",
	PREINPROG = 1085 => "RPMTAG_PREINPROG",
	POSTINPROG = 1086 => "RPMTAG_POSTINPROG",
	PREUNPROG = 1087 => "RPMTAG_PREUNPROG",
	POSTUNPROG = 1088 => "RPMTAG_POSTUNPROG",
	BUILDARCHS = 1089 => "RPMTAG_BUILDARCHS",
	OBSOLETENAME = 1090 => "RPMTAG_OBSOLETENAME",
	VERIFYSCRIPTPROG = 1091 => "RPMTAG_VERIFYSCRIPTPROG",
	TRIGGERSCRIPTPROG = 1092 => "RPMTAG_TRIGGERSCRIPTPROG",
	DOCDIR = 1093 => "RPMTAG_DOCDIR",
	COOKIE = 1094 => "RPMTAG_COOKIE",
	FILEDEVICES = 1095 => "RPMTAG_FILEDEVICES",
	FILEINODES = 1096 => "RPMTAG_FILEINODES",
	FILELANGS = 1097 => "RPMTAG_FILELANGS",
	PREFIXES = 1098 => "RPMTAG_PREFIXES",
	INSTPREFIXES = 1099 => "RPMTAG_INSTPREFIXES",
	TRIGGERIN = 1100 => "RPMTAG_TRIGGERIN",
	TRIGGERUN = 1101 => "RPMTAG_TRIGGERUN",
	TRIGGERPOSTUN = 1102 => "RPMTAG_TRIGGERPOSTUN",
	AUTOREQ = 1103 => "RPMTAG_AUTOREQ",
	AUTOPROV = 1104 => "RPMTAG_AUTOPROV",
	CAPABILITY = 1105 => "RPMTAG_CAPABILITY",
	SOURCEPACKAGE = 1106 => "RPMTAG_SOURCEPACKAGE",
	OLDORIGFILENAMES = 1107 => "RPMTAG_OLDORIGFILENAMES",
	BUILDPREREQ = 1108 => "RPMTAG_BUILDPREREQ",
	BUILDREQUIRES = 1109 => "RPMTAG_BUILDREQUIRES",
	BUILDCONFLICTS = 1110 => "RPMTAG_BUILDCONFLICTS",
	BUILDMACROS = 1111 => "RPMTAG_BUILDMACROS",
	PROVIDEFLAGS = 1112 => "RPMTAG_PROVIDEFLAGS",
	PROVIDEVERSION = 1113 => "RPMTAG_PROVIDEVERSION",
	OBSOLETEFLAGS = 1114 => "RPMTAG_OBSOLETEFLAGS",
	OBSOLETEVERSION = 1115 => "RPMTAG_OBSOLETEVERSION",
	DIRINDEXES = 1116 => "RPMTAG_DIRINDEXES",
	BASENAMES = 1117 => "RPMTAG_BASENAMES",
	DIRNAMES = 1118 => "RPMTAG_DIRNAMES",
	ORIGDIRINDEXES = 1119 => "RPMTAG_ORIGDIRINDEXES",
	ORIGBASENAMES = 1120 => "RPMTAG_ORIGBASENAMES",
	ORIGDIRNAMES = 1121 => "RPMTAG_ORIGDIRNAMES",
	OPTFLAGS = 1122 => "RPMTAG_OPTFLAGS",
	DISTURL = 1123 => "RPMTAG_DISTURL",
	PAYLOADFORMAT = 1124 => "RPMTAG_PAYLOADFORMAT",
	PAYLOADCOMPRESSOR = 1125 => "RPMTAG_PAYLOADCOMPRESSOR",
	PAYLOADFLAGS = 1126 => "RPMTAG_PAYLOADFLAGS",
	INSTALLCOLOR = 1127 => "RPMTAG_INSTALLCOLOR",
	INSTALLTID = 1128 => "RPMTAG_INSTALLTID",
	REMOVETID = 1129 => "RPMTAG_REMOVETID",
	SHA1RHN = 1130 => "RPMTAG_SHA1RHN",
	RHNPLATFORM = 1131 => "RPMTAG_RHNPLATFORM",
	PLATFORM = 1132 => "RPMTAG_PLATFORM",
	PATCHESNAME = 1133 => "RPMTAG_PATCHESNAME",
	PATCHESFLAGS = 1134 => "RPMTAG_PATCHESFLAGS",
	PATCHESVERSION = 1135 => "RPMTAG_PATCHESVERSION",
	CACHECTIME = 1136 => "RPMTAG_CACHECTIME",
	CACHEPKGPATH = 1137 => "RPMTAG_CACHEPKGPATH",
	CACHEPKGSIZE = 1138 => "RPMTAG_CACHEPKGSIZE",
	CACHEPKGMTIME = 1139 => "RPMTAG_CACHEPKGMTIME",
	FILECOLORS = 1140 => "RPMTAG_FILECOLORS",
	FILECLASS = 1141 => "RPMTAG_FILECLASS",
	CLASSDICT = 1142 => "RPMTAG_CLASSDICT",
	FILEDEPENDSX = 1143 => "RPMTAG_FILEDEPENDSX",
	FILEDEPENDSN = 1144 => "RPMTAG_FILEDEPENDSN",
	DEPENDSDICT = 1145 => "RPMTAG_DEPENDSDICT",
	SOURCEPKGID = 1146 => "RPMTAG_SOURCEPKGID",
	FILECONTEXTS = 1147 => "RPMTAG_FILECONTEXTS",
	FSCONTEXTS = 1148 => "RPMTAG_FSCONTEXTS",
	RECONTEXTS = 1149 => "RPMTAG_RECONTEXTS",
	POLICIES = 1150 => "RPMTAG_POLICIES",
	FILENAMES = 5000 => "RPMTAG_FILENAMES",
	PAYLOADDIGEST = 5092 => "RPMTAG_PAYLOADDIGEST",
	PAYLOADDIGESTALGO = 5093 => "RPMTAG_PAYLOADDIGESTALGO",
}

/// Tags that don't exist physically in headers, and the tag that holds their value instead.
///
/// Lookups of the alias use the target, falling back to the alias itself if the target is absent.
pub const ALIASES: &[(i32, i32)] = &[(FILENAMES, BASENAMES)];

/// The physical tag to look up in place of `tag`, if `tag` is an alias.
pub fn alias_target(tag: i32) -> Option<i32> {
	ALIASES
		.iter()
		.find(|(alias, _)| *alias == tag)
		.map(|(_, target)| *target)
}

/// Display name for a tag: its symbolic name, or `UNKNOWN_` and the number.
pub fn display(tag: i32, lookup: fn(i32) -> Option<&'static str>) -> String {
	lookup(tag).map_or_else(|| format!("UNKNOWN_{tag}"), str::to_owned)
}

pub mod signature {
	//! Signature header tags.

	tags! {
		HEADERSIGNATURES = 62 => "RPMTAG_HEADERSIGNATURES",
		DSA = 267 => "RPMSIGTAG_DSA",
		RSA = 268 => "RPMSIGTAG_RSA",
		SHA1 = 269 => "RPMSIGTAG_SHA1",
		LONGSIZE = 270 => "RPMSIGTAG_LONGSIZE",
		LONGARCHIVESIZE = 271 => "RPMSIGTAG_LONGARCHIVESIZE",
		SHA256 = 273 => "RPMSIGTAG_SHA256",
		FILESIGNATURES = 274 => "RPMSIGTAG_FILESIGNATURES",
		FILESIGNATURELENGTH = 275 => "RPMSIGTAG_FILESIGNATURELENGTH",
		VERITYSIGNATURES = 276 => "RPMSIGTAG_VERITYSIGNATURES",
		VERITYSIGNATUREALGO = 277 => "RPMSIGTAG_VERITYSIGNATUREALGO",
		SIZE = 1000 => "RPMSIGTAG_SIZE",
		LEMD5_1 = 1001 => "RPMSIGTAG_LEMD5_1",
		PGP = 1002 => "RPMSIGTAG_PGP",
		LEMD5_2 = 1003 => "RPMSIGTAG_LEMD5_2",
		MD5 = 1004 => "RPMSIGTAG_MD5",
		GPG = 1005 => "RPMSIGTAG_GPG",
		PGP5 = 1006 => "RPMSIGTAG_PGP5",
		PAYLOADSIZE = 1007 => "RPMSIGTAG_PAYLOADSIZE",
		RESERVEDSPACE = 1008 => "RPMSIGTAG_RESERVEDSPACE",
	}
}
